//! Polynomial root finding
//!
//! Roots at the origin are split off first (they are exact and carry no
//! resonance). The remaining polynomial is solved in closed form up to
//! degree 2, otherwise through the eigenvalues of its Frobenius companion
//! matrix, and each root is then refined with Newton-Raphson on the deflated
//! polynomial.

use nalgebra::linalg::Schur;
use nalgebra::DMatrix;
use num_complex::Complex;

/// Coefficients with magnitude below this do not count as a leading term
const LEADING_TOLERANCE: f64 = 1e-15;

/// Schur QR sweeps allowed per degree before giving up
const SCHUR_SWEEPS_PER_DEGREE: usize = 60;

/// Newton-Raphson iteration limit per root
const MAX_POLISH_ITER: usize = 80;

/// Imaginary parts below this are treated as real roots
const REAL_ROOT_TOLERANCE: f64 = 1e-15;

/// Find all complex roots of a real polynomial
///
/// # Arguments
/// * `coefficients` - Ascending order: `coefficients[0]` is the constant
///   term and the last entry the leading coefficient
///
/// # Returns
/// One root per degree (with multiplicity), in no particular order, or
/// `None` when the eigenvalue iteration does not converge. A vanishing
/// leading coefficient lowers the degree.
pub fn polynomial_roots(coefficients: &[f64]) -> Option<Vec<Complex<f64>>> {
    let Some(degree) = coefficients
        .iter()
        .rposition(|c| c.abs() >= LEADING_TOLERANCE)
    else {
        return Some(Vec::new());
    };
    let polynomial = &coefficients[..=degree];

    // z^k factor: k roots exactly at the origin
    let at_origin = polynomial.iter().take_while(|&&c| c == 0.0).count();
    let deflated = &polynomial[at_origin..];

    let mut roots = nonzero_roots(deflated)?;
    polish_roots(deflated, &mut roots);
    roots.extend(std::iter::repeat(Complex::new(0.0, 0.0)).take(at_origin));
    Some(roots)
}

/// Roots of a polynomial with a nonzero constant and leading term
fn nonzero_roots(p: &[f64]) -> Option<Vec<Complex<f64>>> {
    let degree = p.len().saturating_sub(1);
    let lead = p[degree];

    match degree {
        0 => Some(Vec::new()),
        1 => Some(vec![Complex::new(-p[0] / lead, 0.0)]),
        2 => {
            let b = p[1] / lead;
            let c = p[0] / lead;
            let discriminant = b * b - 4.0 * c;
            if discriminant < 0.0 {
                let im = 0.5 * (-discriminant).sqrt();
                Some(vec![Complex::new(-0.5 * b, im), Complex::new(-0.5 * b, -im)])
            } else {
                // Avoid cancellation: take the larger root first, the other from c = z1 z2
                let q = -0.5 * (b + b.signum() * discriminant.sqrt());
                Some(vec![Complex::new(q, 0.0), Complex::new(c / q, 0.0)])
            }
        }
        _ => {
            // First row holds -a[m-1], ..., -a[0] of the monic polynomial,
            // ones on the subdiagonal
            let companion = DMatrix::from_fn(degree, degree, |i, j| {
                if i == 0 {
                    -p[degree - 1 - j] / lead
                } else if i == j + 1 {
                    1.0
                } else {
                    0.0
                }
            });

            let schur = Schur::try_new(companion, f64::EPSILON, SCHUR_SWEEPS_PER_DEGREE * degree)?;
            Some(
                schur
                    .complex_eigenvalues()
                    .iter()
                    .map(|z| Complex::new(z.re, z.im))
                    .collect(),
            )
        }
    }
}

/// Evaluate a polynomial and its derivative at `z` (Horner's scheme)
fn evaluate_with_derivative(coefficients: &[f64], z: Complex<f64>) -> (Complex<f64>, Complex<f64>) {
    let mut value = Complex::new(0.0, 0.0);
    let mut derivative = Complex::new(0.0, 0.0);
    for &c in coefficients.iter().rev() {
        derivative = derivative * z + value;
        value = value * z + c;
    }
    (value, derivative)
}

/// Refine one root with Newton-Raphson, keeping the best iterate
///
/// Stops as soon as the residual stops decreasing or the derivative vanishes.
/// Real roots are kept on the real axis.
fn polish_root(coefficients: &[f64], root: Complex<f64>) -> Complex<f64> {
    let is_real = root.im.abs() <= REAL_ROOT_TOLERANCE;
    let mut z = if is_real { Complex::new(root.re, 0.0) } else { root };
    let mut best = z;
    let mut min_residual = f64::MAX;

    for _ in 0..MAX_POLISH_ITER {
        let (p, dp) = evaluate_with_derivative(coefficients, z);
        let residual = p.norm();

        if !residual.is_finite() || residual >= min_residual {
            break;
        }
        min_residual = residual;
        best = z;

        if residual == 0.0 || dp.norm() == 0.0 {
            break;
        }

        z -= p / dp;
        if is_real {
            z.im = 0.0;
        }
    }

    best
}

/// Polish every root in place
///
/// Complex roots of a real polynomial come in conjugate pairs; a root whose
/// conjugate directly follows it is polished once and mirrored.
fn polish_roots(coefficients: &[f64], roots: &mut [Complex<f64>]) {
    let mut i = 0;
    while i < roots.len() {
        let original = roots[i];
        roots[i] = polish_root(coefficients, original);

        if original.im.abs() > REAL_ROOT_TOLERANCE && i + 1 < roots.len() {
            let next = roots[i + 1];
            if (next.im + original.im).abs() < 1e-10 && (next.re - original.re).abs() < 1e-10 {
                roots[i + 1] = roots[i].conj();
                i += 1;
            }
        }
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn roots_of(coefficients: &[f64]) -> Vec<Complex<f64>> {
        polynomial_roots(coefficients).expect("eigenvalues should converge")
    }

    fn sorted_real_parts(roots: &[Complex<f64>]) -> Vec<f64> {
        let mut re: Vec<f64> = roots.iter().map(|r| r.re).collect();
        re.sort_by(|a, b| a.total_cmp(b));
        re
    }

    #[test]
    fn test_roots_linear() {
        // 2z - 4 = 0
        let roots = roots_of(&[-4.0, 2.0]);
        assert_eq!(roots.len(), 1);
        assert_relative_eq!(roots[0].re, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_roots_quadratic() {
        // z^2 - 5z + 6 = 0 has roots 2 and 3
        let roots = roots_of(&[6.0, -5.0, 1.0]);

        assert_eq!(roots.len(), 2);
        let re = sorted_real_parts(&roots);
        assert_relative_eq!(re[0], 2.0, epsilon = 1e-10);
        assert_relative_eq!(re[1], 3.0, epsilon = 1e-10);
    }

    #[test]
    fn test_roots_quadratic_widely_spread() {
        // (z - 1e-6)(z - 1e6): the small root survives without cancellation
        let roots = roots_of(&[1.0, -(1e6 + 1e-6), 1.0]);
        let re = sorted_real_parts(&roots);
        assert_relative_eq!(re[0], 1e-6, max_relative = 1e-9);
        assert_relative_eq!(re[1], 1e6, max_relative = 1e-9);
    }

    #[test]
    fn test_roots_complex_pair() {
        // z^2 + 1 = 0 has roots i and -i
        let roots = roots_of(&[1.0, 0.0, 1.0]);

        assert_eq!(roots.len(), 2);
        for root in &roots {
            assert_relative_eq!(root.re, 0.0, epsilon = 1e-10);
            assert_relative_eq!(root.im.abs(), 1.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_roots_cubic_via_companion() {
        // (z - 1)(z - 2)(z + 3) = z^3 - 7z + 6
        let roots = roots_of(&[6.0, -7.0, 0.0, 1.0]);

        assert_eq!(roots.len(), 3);
        let re = sorted_real_parts(&roots);
        assert_relative_eq!(re[0], -3.0, epsilon = 1e-9);
        assert_relative_eq!(re[1], 1.0, epsilon = 1e-9);
        assert_relative_eq!(re[2], 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_roots_resonator_pair() {
        // Pole pair at radius 0.95, angle 0.3 rad, plus a real pole at 0.5
        let (r, theta) = (0.95_f64, 0.3_f64);
        let quad = [r * r, -2.0 * r * theta.cos(), 1.0];
        // Multiply by (z - 0.5)
        let coeffs = [
            -0.5 * quad[0],
            quad[0] - 0.5 * quad[1],
            quad[1] - 0.5 * quad[2],
            quad[2],
        ];

        let roots = roots_of(&coeffs);
        let upper: Vec<&Complex<f64>> = roots.iter().filter(|z| z.im > 1e-6).collect();

        assert_eq!(upper.len(), 1);
        assert_relative_eq!(upper[0].norm(), r, epsilon = 1e-10);
        assert_relative_eq!(upper[0].arg(), theta, epsilon = 1e-10);
    }

    #[test]
    fn test_roots_leading_zero_lowers_degree() {
        let roots = roots_of(&[-1.0, 1.0, 0.0]);
        assert_eq!(roots.len(), 1);
        assert_relative_eq!(roots[0].re, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pure_power_has_all_roots_at_origin() {
        // z^12: the companion matrix would be a nilpotent shift
        let mut coeffs = vec![0.0; 13];
        coeffs[12] = 1.0;

        let roots = roots_of(&coeffs);

        assert_eq!(roots.len(), 12);
        assert!(roots.iter().all(|z| z.norm() == 0.0));
    }

    #[test]
    fn test_origin_roots_split_off() {
        // z^3 (z - 1)(z - 2)(z + 3)
        let roots = roots_of(&[0.0, -0.0, 0.0, 6.0, -7.0, 0.0, 1.0]);

        assert_eq!(roots.len(), 6);
        assert_eq!(roots.iter().filter(|z| z.norm() == 0.0).count(), 3);
        let nonzero: Vec<Complex<f64>> = roots.into_iter().filter(|z| z.norm() > 0.0).collect();
        let re = sorted_real_parts(&nonzero);
        assert_relative_eq!(re[0], -3.0, epsilon = 1e-9);
        assert_relative_eq!(re[2], 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_roots_constant() {
        assert_eq!(polynomial_roots(&[3.0]), Some(Vec::new()));
        assert_eq!(polynomial_roots(&[]), Some(Vec::new()));
        assert_eq!(polynomial_roots(&[0.0, 0.0]), Some(Vec::new()));
    }
}
