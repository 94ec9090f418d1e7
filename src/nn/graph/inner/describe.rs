/*
 * @Author       : 老董
 * @Date         : 2026-10-17
 * @Description  : GraphInner summary 相关方法
 */

use super::GraphInner;
use crate::nn::graph::types::LayerKind;
use std::fmt::Write;

impl GraphInner {
    /// 打印图摘要：所有层与连接
    pub fn summary(&self) {
        println!("{}", self.summary_string());
    }

    /// 生成图摘要字符串
    ///
    /// # 示例
    /// ```ignore
    /// // 图: default_graph（3个层，2个连接）
    /// // 层:
    /// //   #0 Layer:0   Real  4
    /// // ...
    /// ```
    pub fn summary_string(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "图: {}（{}个层，{}个连接）",
            self.name,
            self.layers.len(),
            self.connections.len()
        );

        let mut layer_ids: Vec<_> = self.layers.keys().copied().collect();
        layer_ids.sort();
        let _ = writeln!(out, "层:");
        for id in layer_ids {
            let layer = &self.layers[&id];
            let kind = match layer.kind {
                LayerKind::Real => "Real",
                LayerKind::Bias => "Bias",
            };
            let _ = writeln!(
                out,
                "  #{:<4} {:<16} {:<5} {}",
                id.0, layer.name, kind, layer.size
            );
        }

        let mut connection_ids: Vec<_> = self.connections.keys().copied().collect();
        connection_ids.sort();
        let _ = writeln!(out, "连接:");
        for id in connection_ids {
            let c = &self.connections[&id];
            let _ = writeln!(
                out,
                "  #{:<4} {} -> {}  {:?}",
                id.0,
                self.layers[&c.input].name,
                self.layers[&c.output].name,
                c.weights.shape()
            );
        }
        out
    }
}
