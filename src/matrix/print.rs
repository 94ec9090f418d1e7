use crate::matrix::Matrix;
use std::fmt;

impl Matrix {
    pub fn print(&self) {
        println!("{self}");
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        for r in 0..self.rows() {
            write!(f, "[")?;
            for c in 0..self.cols() {
                write!(f, "{:8.4}", self.get(r, c))?;
                if c + 1 != self.cols() {
                    write!(f, ", ")?;
                }
            }
            write!(f, "]")?;
            if r + 1 != self.rows() {
                write!(f, ",\n ")?;
            }
        }
        write!(f, "]")?;
        writeln!(f, "\n形状: {:?}", self.shape())
    }
}
