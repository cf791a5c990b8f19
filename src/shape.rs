//! Partitioning array shapes into domain, range and interval-set parts.
//!
//! An interval array is shaped `[2] ++ domain-shape ++ set-shape`; the
//! integrand maps points shaped `domain-shape ++ set-shape ++ [n]` to
//! values shaped `range-shape ++ set-shape ++ [n]`. When the caller does
//! not declare the partition explicitly it is inferred from one observed
//! integrand output by matching the trailing axes of both shapes. The
//! heuristic is ambiguous when domain and range end in coincidentally
//! equal sizes, so explicit hints always take precedence.

use crate::error::{QuadError, QuadResult};

/// The inferred or declared shape partition of one adaptive call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemShapes {
    /// Geometry of a single interval endpoint (often empty: scalar bounds).
    pub domain: Vec<usize>,
    /// Shape of one integrand output component (empty: scalar integrand).
    pub range: Vec<usize>,
    /// Batch shape: how many independent sub-problems run together.
    pub set: Vec<usize>,
}

/// Derive the domain/range/set partition from the interval-array shape and
/// one observed integrand output shape.
///
/// Fails with [`QuadError::ShapeMismatch`] if the leading interval axis is
/// not 2, the trailing output axis is not the node count, or the shapes
/// cannot be partitioned consistently with the hints. There is no silent
/// broadcasting.
pub fn infer_shapes(
    interval_shape: &[usize],
    output_shape: &[usize],
    n_nodes: usize,
    domain_hint: Option<&[usize]>,
    range_hint: Option<&[usize]>,
) -> QuadResult<ProblemShapes> {
    if interval_shape.first() != Some(&2) {
        return Err(QuadError::ShapeMismatch {
            expected: "[2, ...]".to_string(),
            actual: interval_shape.to_vec(),
            context: "interval array".to_string(),
        });
    }
    if output_shape.last() != Some(&n_nodes) {
        return Err(QuadError::ShapeMismatch {
            expected: format!("[..., {}]", n_nodes),
            actual: output_shape.to_vec(),
            context: "integrand output".to_string(),
        });
    }

    // domain ++ set, and range ++ set respectively.
    let dset = &interval_shape[1..];
    let rset = &output_shape[..output_shape.len() - 1];

    let shapes = match (domain_hint, range_hint) {
        (Some(domain), Some(range)) => {
            let set = strip_prefix(dset, domain, "interval array", "domain_shape")?;
            let declared = strip_prefix(rset, range, "integrand output", "range_shape")?;
            if declared != set {
                return Err(QuadError::ShapeMismatch {
                    expected: format!("{:?} ++ {:?} ++ [{}]", range, set, n_nodes),
                    actual: output_shape.to_vec(),
                    context: "integrand output".to_string(),
                });
            }
            ProblemShapes {
                domain: domain.to_vec(),
                range: range.to_vec(),
                set: set.to_vec(),
            }
        }
        (Some(domain), None) => {
            let set = strip_prefix(dset, domain, "interval array", "domain_shape")?;
            let range = strip_suffix(rset, set, "integrand output")?;
            ProblemShapes {
                domain: domain.to_vec(),
                range: range.to_vec(),
                set: set.to_vec(),
            }
        }
        (None, Some(range)) => {
            let set = strip_prefix(rset, range, "integrand output", "range_shape")?;
            let domain = strip_suffix(dset, set, "interval array")?;
            ProblemShapes {
                domain: domain.to_vec(),
                range: range.to_vec(),
                set: set.to_vec(),
            }
        }
        (None, None) => {
            // Greedy common-suffix match; the matched suffix is the batch.
            let mut common = 0;
            while common < dset.len()
                && common < rset.len()
                && dset[dset.len() - 1 - common] == rset[rset.len() - 1 - common]
            {
                common += 1;
            }
            ProblemShapes {
                domain: dset[..dset.len() - common].to_vec(),
                range: rset[..rset.len() - common].to_vec(),
                set: dset[dset.len() - common..].to_vec(),
            }
        }
    };

    Ok(shapes)
}

fn strip_prefix<'a>(
    shape: &'a [usize],
    prefix: &[usize],
    context: &str,
    hint: &str,
) -> QuadResult<&'a [usize]> {
    if shape.len() < prefix.len() || &shape[..prefix.len()] != prefix {
        return Err(QuadError::ShapeMismatch {
            expected: format!("{:?} ++ ... (declared {})", prefix, hint),
            actual: shape.to_vec(),
            context: context.to_string(),
        });
    }
    Ok(&shape[prefix.len()..])
}

fn strip_suffix<'a>(shape: &'a [usize], suffix: &[usize], context: &str) -> QuadResult<&'a [usize]> {
    if shape.len() < suffix.len() || &shape[shape.len() - suffix.len()..] != suffix {
        return Err(QuadError::ShapeMismatch {
            expected: format!("... ++ {:?}", suffix),
            actual: shape.to_vec(),
            context: context.to_string(),
        });
    }
    Ok(&shape[..shape.len() - suffix.len()])
}
