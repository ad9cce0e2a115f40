//! Fitting routines operating on plain `(x, y)` sample arrays. Callers
//! unwrap longitude sequences before calling these, and rewrap the result
//! afterward; these functions know nothing about angles.

/// Two-point linear interpolation.
pub fn linear(xs: &[f64], ys: &[f64], target: f64) -> f64 {
    debug_assert_eq!(xs.len(), 2);
    debug_assert_eq!(ys.len(), 2);
    let (x0, x1) = (xs[0], xs[1]);
    let (y0, y1) = (ys[0], ys[1]);
    if (x1 - x0).abs() < f64::EPSILON {
        return y0;
    }
    y0 + (y1 - y0) * (target - x0) / (x1 - x0)
}

/// Lagrange polynomial interpolation through an arbitrary number of points.
pub fn lagrange(xs: &[f64], ys: &[f64], target: f64) -> f64 {
    let n = xs.len();
    let mut total = 0.0;
    for i in 0..n {
        let mut term = ys[i];
        for j in 0..n {
            if i == j {
                continue;
            }
            term *= (target - xs[j]) / (xs[i] - xs[j]);
        }
        total += term;
    }
    total
}

/// Natural cubic spline interpolation (second derivative zero at both
/// endpoints). Requires at least 4 points; callers fall back to
/// [`lagrange`] below that, per the interpolator's documented contract.
pub fn natural_cubic_spline(xs: &[f64], ys: &[f64], target: f64) -> f64 {
    let n = xs.len();
    debug_assert!(n >= 4, "natural cubic spline needs at least 4 samples");

    let h: Vec<f64> = (0..n - 1).map(|i| xs[i + 1] - xs[i]).collect();

    // Tridiagonal system for the second derivatives `m` via the Thomas
    // algorithm; natural boundary conditions fix m[0] = m[n-1] = 0.
    let mut alpha = vec![0.0; n];
    for i in 1..n - 1 {
        alpha[i] = 3.0 * ((ys[i + 1] - ys[i]) / h[i] - (ys[i] - ys[i - 1]) / h[i - 1]);
    }

    let mut l = vec![1.0; n];
    let mut mu = vec![0.0; n];
    let mut z = vec![0.0; n];

    for i in 1..n - 1 {
        l[i] = 2.0 * (xs[i + 1] - xs[i - 1]) - h[i - 1] * mu[i - 1];
        mu[i] = h[i] / l[i];
        z[i] = (alpha[i] - h[i - 1] * z[i - 1]) / l[i];
    }

    let mut c = vec![0.0; n];
    let mut b = vec![0.0; n - 1];
    let mut d = vec![0.0; n - 1];

    for j in (0..n - 1).rev() {
        c[j] = z[j] - mu[j] * c[j + 1];
        b[j] = (ys[j + 1] - ys[j]) / h[j] - h[j] * (c[j + 1] + 2.0 * c[j]) / 3.0;
        d[j] = (c[j + 1] - c[j]) / (3.0 * h[j]);
    }

    // Find the segment containing `target`, clamping to the end segments
    // for extrapolation just outside the sampled range.
    let mut segment = n - 2;
    for i in 0..n - 1 {
        if target >= xs[i] && target <= xs[i + 1] {
            segment = i;
            break;
        }
    }

    let dx = target - xs[segment];
    ys[segment] + b[segment] * dx + c[segment] * dx * dx + d[segment] * dx * dx * dx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_interpolates_midpoint() {
        let v = linear(&[0.0, 1.0], &[10.0, 20.0], 0.5);
        assert!((v - 15.0).abs() < 1e-9);
    }

    #[test]
    fn lagrange_reproduces_exact_samples() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = [1.0, 3.0, 7.0, 13.0, 21.0];
        for (x, y) in xs.iter().zip(ys.iter()) {
            let v = lagrange(&xs, &ys, *x);
            assert!((v - y).abs() < 1e-6, "x={x} v={v} y={y}");
        }
    }

    #[test]
    fn lagrange_fits_a_quadratic_exactly() {
        // y = x^2 + 2x + 1, sampled at 5 points; Lagrange of degree 4
        // reproduces it exactly everywhere, not just at the samples.
        let xs = [-2.0, -1.0, 0.0, 1.0, 2.0];
        let ys: Vec<f64> = xs.iter().map(|x| x * x + 2.0 * x + 1.0).collect();
        let v = lagrange(&xs, &ys, 0.5);
        let expected = 0.5 * 0.5 + 2.0 * 0.5 + 1.0;
        assert!((v - expected).abs() < 1e-9);
    }

    #[test]
    fn spline_reproduces_exact_samples() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = [0.0, 1.0, 0.0, 1.0, 0.0];
        for (x, y) in xs.iter().zip(ys.iter()) {
            let v = natural_cubic_spline(&xs, &ys, *x);
            assert!((v - y).abs() < 1e-6, "x={x} v={v} y={y}");
        }
    }
}
