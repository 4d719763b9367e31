//! Sanity checks for tuning values the movement core assumes but never re-checks.

use super::data::MovementTuning;

/// A tuning value outside the range the simulation supports.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tuning field '{}' {}", self.field, self.message)
    }
}

/// Helper macro for checking a value is strictly positive
macro_rules! check_positive {
    ($errors:expr, $value:expr, $field:expr) => {
        if !($value > 0.0) {
            $errors.push(ValidationError {
                field: $field,
                message: format!("must be positive, got {}", $value),
            });
        }
    };
}

/// Validate every tuning value.
/// Returns a list of validation errors, empty if all values are usable.
pub fn validate_tuning(tuning: &MovementTuning) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // Body: ray spacing divides by (count - 1)
    let body = &tuning.body;
    if body.horizontal_rays < 2 {
        errors.push(ValidationError {
            field: "body.horizontal_rays",
            message: format!("must be at least 2, got {}", body.horizontal_rays),
        });
    }
    if body.vertical_rays < 2 {
        errors.push(ValidationError {
            field: "body.vertical_rays",
            message: format!("must be at least 2, got {}", body.vertical_rays),
        });
    }
    check_positive!(errors, body.width, "body.width");
    check_positive!(errors, body.height, "body.height");
    if body.ray_inset < 0.0 || body.ray_inset >= body.width.min(body.height) {
        errors.push(ValidationError {
            field: "body.ray_inset",
            message: format!(
                "must be in [0, {}), got {}",
                body.width.min(body.height),
                body.ray_inset
            ),
        });
    }

    // Motor
    check_positive!(errors, tuning.motor.max_speed, "motor.max_speed");
    check_positive!(errors, tuning.motor.max_jump_time, "motor.max_jump_time");
    if tuning.motor.gravity > 0.0 {
        errors.push(ValidationError {
            field: "motor.gravity",
            message: format!("must point down, got {}", tuning.motor.gravity),
        });
    }

    // Abilities
    check_positive!(errors, tuning.grapple.max_distance, "grapple.max_distance");
    check_positive!(errors, tuning.grapple.swing_speed, "grapple.swing_speed");
    check_positive!(errors, tuning.grapple.throw_time, "grapple.throw_time");
    check_positive!(errors, tuning.grapple.cooldown, "grapple.cooldown");
    check_positive!(errors, tuning.dash.length, "dash.length");
    check_positive!(errors, tuning.dash.cooldown, "dash.cooldown");
    check_positive!(errors, tuning.cloud.lifetime, "cloud.lifetime");
    check_positive!(errors, tuning.cloud.cooldown, "cloud.cooldown");

    // Time control
    let factor = tuning.slow_motion.factor;
    if !(factor > 0.0 && factor <= 1.0) {
        errors.push(ValidationError {
            field: "slow_motion.factor",
            message: format!("must be in (0, 1], got {}", factor),
        });
    }
    check_positive!(errors, tuning.slow_motion.budget, "slow_motion.budget");

    if !(tuning.simulation.tick_rate > 0.0) {
        errors.push(ValidationError {
            field: "simulation.tick_rate",
            message: format!("must be positive, got {}", tuning.simulation.tick_rate),
        });
    }

    errors
}
