/*
 * @Author       : 老董
 * @Date         : 2026-10-17
 * @Description  : 训练输入提供器：逐个产出（输入, 目标）样本，可反复重置从头开始
 */

use super::error::DataError;
use crate::matrix::Matrix;
use rand::SeedableRng;
use rand::seq::SliceRandom;

/// 一个训练样本。输入与目标都是按列排放的向量（形状[n, 1]）。
///
/// 提供器会就地改写同一个`TrainingInputData`以避免反复分配，
/// 调用方若要保留某个样本需自行`clone`。
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingInputData {
    input: Matrix,
    target: Option<Matrix>,
}

impl TrainingInputData {
    pub fn new(input: Matrix, target: Option<Matrix>) -> Self {
        Self { input, target }
    }

    pub fn input(&self) -> &Matrix {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut Matrix {
        &mut self.input
    }

    /// 无监督数据没有目标
    pub fn target(&self) -> Option<&Matrix> {
        self.target.as_ref()
    }

    pub fn target_mut(&mut self) -> Option<&mut Matrix> {
        self.target.as_mut()
    }
}

/// 训练输入提供器
///
/// # 约定
/// - `next_input`返回`Ok(None)`表示本轮数据已取完（epoch 边界），这不是错误
/// - `reset`之后重新取完一轮，得到的样本序列与上一轮完全相同
pub trait TrainingInputProvider {
    /// 取下一个样本
    fn next_input(&mut self) -> Result<Option<&TrainingInputData>, DataError>;

    /// 回到第一个样本
    fn reset(&mut self);

    /// 一轮的样本总数
    fn input_size(&self) -> usize;
}

/// 基于内存数据的提供器
///
/// # 示例
/// ```ignore
/// let mut provider = SimpleInputProvider::new(&[[1.0, 0.0, 1.0]], None::<&[[f32; 1]]>)?;
/// while let Some(sample) = provider.next_input()? {
///     println!("{}", sample.input());
/// }
/// provider.reset();
/// ```
pub struct SimpleInputProvider {
    inputs: Vec<Vec<f32>>,
    targets: Option<Vec<Vec<f32>>>,
    /// 样本的遍历顺序，打乱只在构建时发生一次
    order: Vec<usize>,
    cursor: usize,
    current: TrainingInputData,
}

impl SimpleInputProvider {
    /// 每个元素是一个样本
    pub fn new<I, T>(inputs: &[I], targets: Option<&[T]>) -> Result<Self, DataError>
    where
        I: AsRef<[f32]>,
        T: AsRef<[f32]>,
    {
        let inputs = collect_samples(inputs)?;
        let targets = match targets {
            Some(targets) => {
                let targets = collect_samples(targets)?;
                if targets.len() != inputs.len() {
                    return Err(DataError::SampleCountMismatch {
                        inputs: inputs.len(),
                        targets: targets.len(),
                    });
                }
                Some(targets)
            }
            None => None,
        };

        let current = TrainingInputData::new(
            Matrix::zeros(inputs[0].len(), 1),
            targets.as_ref().map(|t| Matrix::zeros(t[0].len(), 1)),
        );
        Ok(Self {
            order: (0..inputs.len()).collect(),
            inputs,
            targets,
            cursor: 0,
            current,
        })
    }

    /// 从矩阵创建：每一行是一个样本（与按列排放的`TrainingInputData`相反，便于书写数据表）
    pub fn from_rows(features: &Matrix, labels: Option<&Matrix>) -> Result<Self, DataError> {
        let rows = |m: &Matrix| -> Vec<Vec<f32>> {
            (0..m.rows())
                .map(|r| (0..m.cols()).map(|c| m.get(r, c)).collect())
                .collect()
        };
        let inputs = rows(features);
        match labels {
            Some(labels) => Self::new(inputs.as_slice(), Some(rows(labels).as_slice())),
            None => Self::new(inputs.as_slice(), None::<&[Vec<f32>]>),
        }
    }

    /// 以固定种子打乱样本顺序。之后每次`reset`都按这个顺序重放。
    pub fn shuffled(mut self, seed: u64) -> Self {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        self.order.shuffle(&mut rng);
        self.cursor = 0;
        self
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

impl TrainingInputProvider for SimpleInputProvider {
    fn next_input(&mut self) -> Result<Option<&TrainingInputData>, DataError> {
        let Some(&index) = self.order.get(self.cursor) else {
            return Ok(None);
        };
        self.cursor += 1;

        for (r, &v) in self.inputs[index].iter().enumerate() {
            self.current.input.set(r, 0, v);
        }
        if let (Some(targets), Some(target)) = (&self.targets, self.current.target.as_mut()) {
            for (r, &v) in targets[index].iter().enumerate() {
                target.set(r, 0, v);
            }
        }
        Ok(Some(&self.current))
    }

    fn reset(&mut self) {
        self.cursor = 0;
    }

    fn input_size(&self) -> usize {
        self.inputs.len()
    }
}

/// 检查样本非空且等长
fn collect_samples<S: AsRef<[f32]>>(samples: &[S]) -> Result<Vec<Vec<f32>>, DataError> {
    let first = samples.first().ok_or(DataError::EmptyDataset)?;
    let expected = first.as_ref().len();
    if expected == 0 {
        return Err(DataError::ShapeMismatch {
            index: 0,
            expected: 1,
            got: 0,
        });
    }
    samples
        .iter()
        .enumerate()
        .map(|(index, s)| {
            let s = s.as_ref();
            if s.len() == expected {
                Ok(s.to_vec())
            } else {
                Err(DataError::ShapeMismatch {
                    index,
                    expected,
                    got: s.len(),
                })
            }
        })
        .collect()
}
