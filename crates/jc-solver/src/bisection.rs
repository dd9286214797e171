//! Bracketed bisection for monotonic scalar residuals.

use thiserror::Error;
use tracing::debug;

/// Bisection convergence settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BisectionConfig {
    /// Maximum number of midpoint evaluations.
    pub max_iterations: usize,
    /// Absolute tolerance on the bracket width.
    pub abs_tol: f64,
    /// Relative tolerance on the bracket width (scaled by |midpoint|).
    pub rel_tol: f64,
    /// Stop as soon as |residual| falls to this value.
    pub residual_tol: f64,
}

impl Default for BisectionConfig {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            abs_tol: 1e-12,
            rel_tol: 1e-9,
            residual_tol: 0.0,
        }
    }
}

impl BisectionConfig {
    pub fn validate(&self) -> Result<(), BisectionError> {
        if self.max_iterations == 0 {
            return Err(BisectionError::InvalidConfig {
                reason: "max_iterations must be positive",
            });
        }
        for tol in [self.abs_tol, self.rel_tol, self.residual_tol] {
            if !tol.is_finite() || tol < 0.0 {
                return Err(BisectionError::InvalidConfig {
                    reason: "tolerances must be finite and non-negative",
                });
            }
        }
        if self.abs_tol == 0.0 && self.rel_tol == 0.0 && self.residual_tol == 0.0 {
            return Err(BisectionError::InvalidConfig {
                reason: "at least one tolerance must be positive",
            });
        }
        Ok(())
    }
}

/// Errors that can occur when creating a [`Bracket`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BracketError {
    #[error("non-finite endpoint(s)")]
    NonFinite,
    #[error("zero width")]
    ZeroWidth,
    #[error("no sign change")]
    NoSignChange,
}

/// Errors raised by [`bisect`] itself (as opposed to the residual function).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BisectionError {
    #[error("invalid bracket: {0}")]
    Bracket(#[from] BracketError),

    #[error("no root in bracket: f({left})={left_residual}, f({right})={right_residual}")]
    NoBracket {
        left: f64,
        right: f64,
        left_residual: f64,
        right_residual: f64,
    },

    #[error("non-finite residual {residual} at x = {x}")]
    NonFiniteResidual { x: f64, residual: f64 },

    #[error("not converged after {iterations} iterations, bracket [{left}, {right}]")]
    MaxIterations {
        iterations: usize,
        left: f64,
        right: f64,
    },

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: &'static str },
}

/// The sign of a residual for bracket logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Residual is positive (or zero).
    Positive,
    Negative,
}

impl Sign {
    #[must_use]
    pub fn of(value: f64) -> Self {
        if value >= 0.0 {
            Sign::Positive
        } else {
            Sign::Negative
        }
    }
}

/// Current bracket bounds and their residual signs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    left: f64,
    right: f64,
    left_sign: Sign,
    right_sign: Sign,
}

impl Bracket {
    /// Order and validate the endpoints `[a, b]` with their residual signs.
    pub fn new(bounds: [f64; 2], signs: [Sign; 2]) -> Result<Self, BracketError> {
        let [a, b] = bounds;
        if !a.is_finite() || !b.is_finite() {
            return Err(BracketError::NonFinite);
        }
        if a == b {
            return Err(BracketError::ZeroWidth);
        }
        if signs[0] == signs[1] {
            return Err(BracketError::NoSignChange);
        }

        let ((left, left_sign), (right, right_sign)) = if a < b {
            ((a, signs[0]), (b, signs[1]))
        } else {
            ((b, signs[1]), (a, signs[0]))
        };
        Ok(Self {
            left,
            right,
            left_sign,
            right_sign,
        })
    }

    #[must_use]
    pub fn as_array(&self) -> [f64; 2] {
        [self.left, self.right]
    }

    #[must_use]
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.left + self.right)
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn is_x_converged(&self, abs_tol: f64, rel_tol: f64) -> bool {
        self.width() <= abs_tol + rel_tol * self.midpoint().abs()
    }

    /// Replace the endpoint whose residual has the same sign as `x`'s.
    pub fn shrink(&mut self, x: f64, sign: Sign) {
        if self.left_sign == sign {
            self.left = x;
        } else {
            self.right = x;
        }
    }
}

/// Converged bisection result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BisectionSolution {
    pub x: f64,
    pub residual: f64,
    pub iterations: usize,
}

/// Find a root of `f` inside `bounds`.
///
/// `f` must change sign over the bracket. The residual function may fail with
/// its own error type `E`; bisection failures are converted into `E` as well,
/// so callers see a single error type.
pub fn bisect<F, E>(
    mut f: F,
    bounds: [f64; 2],
    config: &BisectionConfig,
) -> Result<BisectionSolution, E>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: From<BisectionError>,
{
    config.validate()?;
    let [a, b] = bounds;
    if !a.is_finite() || !b.is_finite() {
        return Err(BisectionError::Bracket(BracketError::NonFinite).into());
    }

    let fa = finite_residual(a, f(a)?)?;
    if fa.abs() <= config.residual_tol {
        return Ok(BisectionSolution {
            x: a,
            residual: fa,
            iterations: 0,
        });
    }
    let fb = finite_residual(b, f(b)?)?;
    if fb.abs() <= config.residual_tol {
        return Ok(BisectionSolution {
            x: b,
            residual: fb,
            iterations: 0,
        });
    }

    let mut bracket = Bracket::new(bounds, [Sign::of(fa), Sign::of(fb)]).map_err(|err| match err {
        BracketError::NoSignChange => BisectionError::NoBracket {
            left: a,
            right: b,
            left_residual: fa,
            right_residual: fb,
        },
        other => BisectionError::Bracket(other),
    })?;

    for iteration in 1..=config.max_iterations {
        let x = bracket.midpoint();
        let residual = finite_residual(x, f(x)?)?;

        if residual.abs() <= config.residual_tol {
            debug!(x, residual, iteration, "bisection converged on residual");
            return Ok(BisectionSolution {
                x,
                residual,
                iterations: iteration,
            });
        }

        bracket.shrink(x, Sign::of(residual));
        if bracket.is_x_converged(config.abs_tol, config.rel_tol) {
            debug!(x, residual, iteration, "bisection converged on bracket width");
            return Ok(BisectionSolution {
                x,
                residual,
                iterations: iteration,
            });
        }
    }

    let [left, right] = bracket.as_array();
    Err(BisectionError::MaxIterations {
        iterations: config.max_iterations,
        left,
        right,
    }
    .into())
}

fn finite_residual(x: f64, residual: f64) -> Result<f64, BisectionError> {
    if residual.is_finite() {
        Ok(residual)
    } else {
        Err(BisectionError::NonFiniteResidual { x, residual })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve(f: impl Fn(f64) -> f64, bounds: [f64; 2]) -> Result<BisectionSolution, BisectionError> {
        bisect(|x| Ok::<_, BisectionError>(f(x)), bounds, &BisectionConfig::default())
    }

    #[test]
    fn finds_square_root() {
        let sol = solve(|x| x * x - 2.0, [0.0, 2.0]).unwrap();
        assert!((sol.x - 2.0_f64.sqrt()).abs() < 1e-8);
        assert!(sol.iterations > 0);
    }

    #[test]
    fn reversed_bracket_is_ordered() {
        let sol = solve(|x| x - 0.25, [1.0, 0.0]).unwrap();
        assert!((sol.x - 0.25).abs() < 1e-9);
    }

    #[test]
    fn decreasing_residual() {
        let sol = solve(|x| 3.0 - x, [0.0, 10.0]).unwrap();
        assert!((sol.x - 3.0).abs() < 1e-8);
    }

    #[test]
    fn root_on_endpoint() {
        let sol = solve(|x| x - 1.0, [1.0, 4.0]).unwrap();
        assert_eq!(sol.x, 1.0);
        assert_eq!(sol.iterations, 0);
    }

    #[test]
    fn no_sign_change_reports_residuals() {
        let err = solve(|x| x * x + 1.0, [-1.0, 2.0]).unwrap_err();
        match err {
            BisectionError::NoBracket {
                left_residual,
                right_residual,
                ..
            } => {
                assert_eq!(left_residual, 2.0);
                assert_eq!(right_residual, 5.0);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_brackets() {
        assert!(matches!(
            solve(|x| x, [1.0, 1.0]),
            Err(BisectionError::Bracket(BracketError::ZeroWidth))
        ));
        assert!(matches!(
            solve(|x| x, [f64::NAN, 1.0]),
            Err(BisectionError::Bracket(BracketError::NonFinite))
        ));
    }

    #[test]
    fn non_finite_residual() {
        let inside = solve(|x| if x > 0.9 { f64::NAN } else { x - 0.5 }, [0.0, 0.8]);
        assert!(inside.is_ok());
        let err = solve(|x| if x > 0.9 { f64::NAN } else { x - 0.5 }, [0.0, 1.0]).unwrap_err();
        assert!(matches!(err, BisectionError::NonFiniteResidual { .. }));
    }

    #[test]
    fn iteration_limit() {
        let config = BisectionConfig {
            max_iterations: 3,
            abs_tol: 1e-15,
            rel_tol: 0.0,
            residual_tol: 0.0,
        };
        let err = bisect(|x| Ok::<_, BisectionError>(x - 0.3), [0.0, 1.0], &config).unwrap_err();
        assert!(matches!(err, BisectionError::MaxIterations { iterations: 3, .. }));
    }

    #[test]
    fn invalid_config() {
        let config = BisectionConfig {
            max_iterations: 0,
            ..BisectionConfig::default()
        };
        assert!(config.validate().is_err());
        let config = BisectionConfig {
            rel_tol: -1.0,
            ..BisectionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn residual_error_propagates() {
        #[derive(Debug, PartialEq)]
        enum Failure {
            Model,
            Solver(BisectionError),
        }
        impl From<BisectionError> for Failure {
            fn from(err: BisectionError) -> Self {
                Failure::Solver(err)
            }
        }

        let result = bisect(
            |x| if x > 0.5 { Err(Failure::Model) } else { Ok(x - 0.7) },
            [0.0, 1.0],
            &BisectionConfig::default(),
        );
        assert_eq!(result.unwrap_err(), Failure::Model);
    }

    #[test]
    fn bracket_shrinks_toward_root() {
        let mut bracket = Bracket::new([0.0, 4.0], [Sign::Negative, Sign::Positive]).unwrap();
        bracket.shrink(2.0, Sign::Negative);
        assert_eq!(bracket.as_array(), [2.0, 4.0]);
        bracket.shrink(3.0, Sign::Positive);
        assert_eq!(bracket.as_array(), [2.0, 3.0]);
        assert_eq!(bracket.width(), 1.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn linear_roots_are_found(root in -100.0f64..100.0, slope in 0.1f64..10.0) {
                let sol = solve(|x| slope * (x - root), [-200.0, 200.0]).unwrap();
                prop_assert!((sol.x - root).abs() < 1e-6);
            }
        }
    }
}
