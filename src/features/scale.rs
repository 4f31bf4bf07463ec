//! Column-wise standardization.

use crate::error::{Error, Result};

/// Per-column mean and standard deviation, fitted on one batch.
///
/// Constant columns keep a scale of 1 so they standardize to zero instead of
/// dividing by zero.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: Vec<f32>,
    scale: Vec<f32>,
}

impl StandardScaler {
    /// Fit mean and (population) standard deviation per column.
    pub fn fit(rows: &[Vec<f32>]) -> Result<Self> {
        let first = rows.first().ok_or(Error::EmptyInput)?;
        let dim = first.len();
        for row in rows {
            if row.len() != dim {
                return Err(Error::DimensionMismatch {
                    expected: dim,
                    found: row.len(),
                });
            }
        }

        let n = rows.len() as f64;
        let mut mean = vec![0.0f64; dim];
        for row in rows {
            for (m, &x) in mean.iter_mut().zip(row) {
                *m += f64::from(x);
            }
        }
        for m in &mut mean {
            *m /= n;
        }

        let mut var = vec![0.0f64; dim];
        for row in rows {
            for ((v, &x), &m) in var.iter_mut().zip(row).zip(&mean) {
                let d = f64::from(x) - m;
                *v += d * d;
            }
        }

        let scale = var
            .iter()
            .map(|v| {
                let std = (v / n).sqrt();
                if std > f64::EPSILON {
                    std as f32
                } else {
                    1.0
                }
            })
            .collect();

        Ok(Self {
            mean: mean.into_iter().map(|m| m as f32).collect(),
            scale,
        })
    }

    /// Standardize `rows` with the fitted statistics.
    pub fn transform(&self, rows: &[Vec<f32>]) -> Result<Vec<Vec<f32>>> {
        rows.iter()
            .map(|row| {
                if row.len() != self.mean.len() {
                    return Err(Error::DimensionMismatch {
                        expected: self.mean.len(),
                        found: row.len(),
                    });
                }
                Ok(row
                    .iter()
                    .zip(&self.mean)
                    .zip(&self.scale)
                    .map(|((x, m), s)| (x - m) / s)
                    .collect())
            })
            .collect()
    }

    /// Fit on `rows` and standardize them.
    pub fn fit_transform(rows: &[Vec<f32>]) -> Result<Vec<Vec<f32>>> {
        Self::fit(rows)?.transform(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standardize_columns() {
        let rows = vec![vec![1.0, 5.0], vec![3.0, 5.0]];
        let out = StandardScaler::fit_transform(&rows).unwrap();
        assert_eq!(out, vec![vec![-1.0, 0.0], vec![1.0, 0.0]]);
    }

    #[test]
    fn test_constant_column_has_unit_scale() {
        let scaler = StandardScaler::fit(&[vec![2.0], vec![2.0], vec![2.0]]).unwrap();
        assert_eq!(scaler.mean, vec![2.0]);
        assert_eq!(scaler.scale, vec![1.0]);
    }

    #[test]
    fn test_errors() {
        assert!(StandardScaler::fit(&[]).is_err());
        assert!(StandardScaler::fit(&[vec![1.0], vec![1.0, 2.0]]).is_err());
    }
}
