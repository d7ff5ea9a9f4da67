use super::*;
use approx::assert_relative_eq;

#[test]
fn test_polynomial_derivative() {
    // f(x) = x^2 + 2x at x = 3
    let x = Dual::variable(3.0);
    let y = x * x + 2.0 * x;
    assert_relative_eq!(y.value(), 15.0);
    assert_relative_eq!(y.deriv(), 8.0);
}

#[test]
fn test_constant_has_no_derivative() {
    let c = Dual::constant(4.0);
    let x = Dual::variable(2.0);
    let y = c * x + c;
    assert_relative_eq!(y.deriv(), 4.0);
    assert_relative_eq!((c * c).deriv(), 0.0);
}

#[test]
fn test_quotient_rule() {
    // f(x) = 1 / (1 + x) at x = 1 -> f' = -1/4
    let x = Dual::variable(1.0);
    let y = 1.0 / (1.0 + x);
    assert_relative_eq!(y.value(), 0.5);
    assert_relative_eq!(y.deriv(), -0.25);
    assert_relative_eq!(x.recip().deriv(), -1.0);
}

#[test]
fn test_transcendental_functions() {
    let x = Dual::variable(0.5);
    assert_relative_eq!(x.exp().deriv(), 0.5f64.exp(), epsilon = 1e-12);
    assert_relative_eq!(x.ln().deriv(), 2.0, epsilon = 1e-12);
    assert_relative_eq!(x.sin().deriv(), 0.5f64.cos(), epsilon = 1e-12);
    assert_relative_eq!(x.cos().deriv(), -(0.5f64.sin()), epsilon = 1e-12);
    assert_relative_eq!(x.sqrt().deriv(), 0.5 / 0.5f64.sqrt(), epsilon = 1e-12);
    let t = 0.5f64.tanh();
    assert_relative_eq!(x.tanh().deriv(), 1.0 - t * t, epsilon = 1e-12);
    let s = 1.0 / (1.0 + (-0.5f64).exp());
    assert_relative_eq!(x.sigmoid().deriv(), s * (1.0 - s), epsilon = 1e-12);
}

#[test]
fn test_powers() {
    let x = Dual::variable(2.0);
    assert_relative_eq!(x.powi(3).value(), 8.0);
    assert_relative_eq!(x.powi(3).deriv(), 12.0);
    assert_relative_eq!(x.powi(0).deriv(), 0.0);
    assert_relative_eq!(x.powf(0.5).deriv(), 0.5 / 2.0f64.sqrt(), epsilon = 1e-12);
}

#[test]
fn test_abs_kink() {
    assert_relative_eq!(Dual::variable(-2.0).abs().deriv(), -1.0);
    assert_relative_eq!(Dual::variable(3.0).abs().deriv(), 1.0);
    assert_relative_eq!(Dual::variable(0.0).abs().deriv(), 0.0);
}

#[test]
fn test_zero_one() {
    assert!(Dual::zero().is_zero());
    assert_eq!(Dual::one(), Dual::constant(1.0));
}
