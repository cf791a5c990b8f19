//! Embedded Gauss-Legendre / Gauss-Kronrod rule pairs.
//!
//! A `k`-point Gauss-Legendre rule is exact for polynomials up to degree
//! 2k-1. Its Kronrod extension adds k+1 nodes, reuses all k Gauss nodes,
//! and is exact up to degree 3k+1, so evaluating the integrand once at the
//! 2k+1 Kronrod nodes yields two estimates of different order and a cheap
//! error indicator from their difference.
//!
//! The default order 7 (G7-K15) uses the classical pre-computed tables.
//! Other orders are constructed at runtime from the Legendre recurrence
//! coefficients: Laurie's algorithm produces the Jacobi-Kronrod matrix and
//! the nodes and weights follow from its symmetric tridiagonal
//! eigendecomposition (Golub-Welsch).

use nalgebra::{DMatrix, SymmetricEigen};

use crate::error::{QuadError, QuadResult};
use crate::estimate::kronrod_error;

/// An embedded Gauss-Kronrod rule pair on [-1, 1].
///
/// Holds the 2k+1 Kronrod nodes and weights together with the k decimated
/// Gauss-Legendre weights. The Gauss estimate is read from the same
/// evaluation buffer as the Kronrod estimate through `gauss_indices`:
/// the i-th Gauss node is `nodes[2*i + 1]`.
#[derive(Debug, Clone)]
pub struct GaussKronrodRule {
    /// Requested Gauss order k.
    pub order: usize,
    /// Kronrod nodes on [-1, 1], ascending (2k+1 values).
    pub nodes: Vec<f64>,
    /// Kronrod weights (2k+1 values, positive, summing to 2).
    pub kronrod_weights: Vec<f64>,
    /// Gauss-Legendre weights aligned with `gauss_indices` (k values).
    pub gauss_weights: Vec<f64>,
    /// Indices of the Gauss nodes within `nodes`: 1, 3, 5, ...
    pub gauss_indices: Vec<usize>,
}

impl GaussKronrodRule {
    /// Create the embedded rule pair of Gauss order `k`.
    ///
    /// Order 7 uses the pre-computed G7-K15 tables; other orders are
    /// constructed numerically.
    ///
    /// # Example
    ///
    /// ```
    /// use adaquad::GaussKronrodRule;
    ///
    /// let rule = GaussKronrodRule::new(7).unwrap();
    /// assert_eq!(rule.nodes.len(), 15);
    /// assert_eq!(rule.gauss_weights.len(), 7);
    /// ```
    pub fn new(k: usize) -> QuadResult<Self> {
        if k == 0 {
            return Err(QuadError::InvalidParameter {
                parameter: "rule_order".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        match k {
            7 => Ok(Self::g7_k15()),
            _ => Self::compute(k),
        }
    }

    /// Number of Kronrod nodes (2k+1).
    pub fn num_nodes(&self) -> usize {
        2 * self.order + 1
    }

    /// One-shot evaluation of a scalar integrand over [a, b].
    ///
    /// Returns the Kronrod estimate together with the heuristic error
    /// estimate built from the embedded pair. This is the non-adaptive
    /// building block; [`crate::integrate_adaptive`] drives it to a
    /// tolerance.
    ///
    /// # Example
    ///
    /// ```
    /// use adaquad::GaussKronrodRule;
    ///
    /// let rule = GaussKronrodRule::new(7).unwrap();
    /// let (value, error) = rule.integrate(|x| x * x, 0.0, 1.0);
    /// assert!((value - 1.0 / 3.0).abs() < 1e-14);
    /// assert!(error >= 0.0);
    /// ```
    pub fn integrate<F>(&self, f: F, a: f64, b: f64) -> (f64, f64)
    where
        F: Fn(f64) -> f64,
    {
        let mid = (a + b) / 2.0;
        let half_width = (b - a) / 2.0;

        let fvals: Vec<f64> = self.nodes.iter().map(|&x| f(mid + half_width * x)).collect();

        let mut val_kronrod = 0.0;
        for (w, fv) in self.kronrod_weights.iter().zip(&fvals) {
            val_kronrod += w * fv;
        }
        val_kronrod *= half_width;

        let mut val_gauss = 0.0;
        for (w, &idx) in self.gauss_weights.iter().zip(&self.gauss_indices) {
            val_gauss += w * fvals[idx];
        }
        val_gauss *= half_width;

        let length = (b - a).abs();
        if length == 0.0 {
            return (0.0, 0.0);
        }

        let average = val_kronrod / (b - a);
        let mut i_tilde = 0.0;
        let mut resabs = 0.0;
        for (w, fv) in self.kronrod_weights.iter().zip(&fvals) {
            i_tilde += w * (fv - average).abs();
            resabs += w * fv.abs();
        }
        i_tilde *= length / 2.0;
        resabs *= length / 2.0;

        let error = kronrod_error(i_tilde, (val_kronrod - val_gauss).abs(), resabs);
        (val_kronrod, error)
    }

    // Classical G7-K15 tables.
    fn g7_k15() -> Self {
        let nodes = vec![
            -0.9914553711208126,
            -0.9491079123427585,
            -0.8648644233597691,
            -0.7415311855993944,
            -0.5860872354676911,
            -0.4058451513773972,
            -0.2077849550078985,
            0.0,
            0.2077849550078985,
            0.4058451513773972,
            0.5860872354676911,
            0.7415311855993944,
            0.8648644233597691,
            0.9491079123427585,
            0.9914553711208126,
        ];
        let kronrod_weights = vec![
            0.022935322010529224,
            0.063_092_092_629_978_56,
            0.10479001032225018,
            0.14065325971552592,
            0.169_004_726_639_267_9,
            0.190_350_578_064_785_4,
            0.20443294007529889,
            0.20948214108472782,
            0.20443294007529889,
            0.190_350_578_064_785_4,
            0.169_004_726_639_267_9,
            0.14065325971552592,
            0.10479001032225018,
            0.063_092_092_629_978_56,
            0.022935322010529224,
        ];
        let gauss_weights = vec![
            0.129_484_966_168_869_7,
            0.27970539148927664,
            0.381_830_050_505_118_9,
            0.417_959_183_673_469_4,
            0.381_830_050_505_118_9,
            0.27970539148927664,
            0.129_484_966_168_869_7,
        ];
        Self {
            order: 7,
            nodes,
            kronrod_weights,
            gauss_weights,
            gauss_indices: (0..7).map(|i| 2 * i + 1).collect(),
        }
    }

    /// Construct the rule pair numerically for an arbitrary order.
    fn compute(k: usize) -> QuadResult<Self> {
        // Legendre recurrence coefficients: a_j = 0, b_0 = 2 (the zeroth
        // moment), b_j = j^2 / (4 j^2 - 1). Laurie's algorithm needs
        // ceil(3k/2) + 1 of them.
        let num_coeffs = (3 * k).div_ceil(2) + 1;
        let a0 = vec![0.0; num_coeffs];
        let mut b0 = vec![0.0; num_coeffs];
        b0[0] = 2.0;
        for (j, b) in b0.iter_mut().enumerate().skip(1) {
            let jf = j as f64;
            *b = jf * jf / (4.0 * jf * jf - 1.0);
        }

        let (ak, bk) = jacobi_kronrod(k, &a0, &b0);
        let (nodes, kronrod_weights) = golub_welsch(&ak, &bk)?;
        let (gauss_nodes, gauss_weights) = golub_welsch(&a0[..k], &b0[..k])?;

        // Every second Kronrod node must coincide with a Gauss node.
        for (i, gn) in gauss_nodes.iter().enumerate() {
            if (nodes[2 * i + 1] - gn).abs() > 1e-8 {
                return Err(QuadError::NumericalError {
                    message: format!(
                        "Kronrod extension of order {} failed: node interleaving broke down",
                        k
                    ),
                });
            }
        }

        Ok(Self {
            order: k,
            nodes,
            kronrod_weights,
            gauss_weights,
            gauss_indices: (0..k).map(|i| 2 * i + 1).collect(),
        })
    }
}

/// Nodes and weights from a Jacobi matrix via its eigendecomposition.
///
/// `a` holds the diagonal, `b[0]` the zeroth moment and `b[1..]` the
/// squared off-diagonal entries. Weights are `b[0]` times the squared
/// first components of the normalized eigenvectors.
fn golub_welsch(a: &[f64], b: &[f64]) -> QuadResult<(Vec<f64>, Vec<f64>)> {
    let n = a.len();
    let mut jacobi = DMatrix::<f64>::zeros(n, n);
    for (i, &ai) in a.iter().enumerate() {
        jacobi[(i, i)] = ai;
    }
    for i in 1..n {
        if b[i] < 0.0 {
            return Err(QuadError::NumericalError {
                message: format!("negative recurrence coefficient b[{}] = {:.3e}", i, b[i]),
            });
        }
        let off = b[i].sqrt();
        jacobi[(i, i - 1)] = off;
        jacobi[(i - 1, i)] = off;
    }

    let eigen = SymmetricEigen::new(jacobi);
    let mut pairs: Vec<(f64, f64)> = (0..n)
        .map(|i| {
            let node = eigen.eigenvalues[i];
            let weight = b[0] * eigen.eigenvectors[(0, i)] * eigen.eigenvectors[(0, i)];
            (node, weight)
        })
        .collect();
    pairs.sort_by(|x, y| x.0.total_cmp(&y.0));

    Ok(pairs.into_iter().unzip())
}

/// Laurie's algorithm for the Jacobi-Kronrod matrix.
///
/// Given the first ceil(3n/2)+1 recurrence coefficients of the weight
/// function, returns the 2n+1 coefficients of the Jacobi matrix whose
/// eigendecomposition yields the (2n+1)-point Kronrod rule.
///
/// D. P. Laurie, Calculation of Gauss-Kronrod quadrature rules,
/// Math. Comp. 66 (1997).
fn jacobi_kronrod(n: usize, a0: &[f64], b0: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let mut a = vec![0.0; 2 * n + 1];
    let mut b = vec![0.0; 2 * n + 1];
    let ka = (3 * n) / 2 + 1;
    a[..ka].copy_from_slice(&a0[..ka]);
    let kb = (3 * n).div_ceil(2) + 1;
    b[..kb].copy_from_slice(&b0[..kb]);

    let len = n / 2 + 2;
    let mut s = vec![0.0; len];
    let mut t = vec![0.0; len];
    t[1] = b[n + 1];

    for m in 0..n - 1 {
        let mut u = 0.0;
        for k in (0..=(m + 1) / 2).rev() {
            let l = m - k;
            u += (a[k + n + 1] - a[l]) * t[k + 1] + b[k + n + 1] * s[k] - b[l] * s[k + 1];
            s[k + 1] = u;
        }
        std::mem::swap(&mut s, &mut t);
    }

    for j in (1..len).rev() {
        s[j] = s[j - 1];
    }

    let mut j = 0usize;
    for m in (n - 1)..(2 * n - 2) {
        let mut u = 0.0;
        for k in (m + 1 - n)..=((m - 1) / 2) {
            let l = m - k;
            j = n - 1 - l;
            u += -(a[k + n + 1] - a[l]) * t[j + 1] - b[k + n + 1] * s[j + 1] + b[l] * s[j + 2];
            s[j + 1] = u;
        }
        let k = (m + 1) / 2;
        if m % 2 == 0 {
            a[k + n + 1] = a[k] + (s[j + 1] - b[k + n + 1] * s[j + 2]) / t[j + 2];
        } else {
            b[k + n + 1] = s[j + 1] / s[j + 2];
        }
        std::mem::swap(&mut s, &mut t);
    }

    a[2 * n] = a[n - 1] - b[2 * n] * s[1] / t[1];
    (a, b)
}
