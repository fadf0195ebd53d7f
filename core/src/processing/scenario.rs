use crate::prelude::{AeroConfig, Scenario};

/// Memoryless classifier from steering angle and lateral acceleration to a [`Scenario`].
///
/// Rules, first match wins:
/// 1. `|steering| < straight` and `|lateral_g| < lateral_g` -> Straight
/// 2. `steering >= turn` or `lateral_g >= lateral_g` -> TurnLeft
/// 3. `steering <= -turn` or `lateral_g <= -lateral_g` -> TurnRight
/// 4. anything else (between the straight and turn thresholds) -> Straight
///
/// There is no hysteresis; inputs hovering at a boundary may alternate tags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioClassifier {
    straight_threshold: f64,
    turn_threshold: f64,
    lateral_g_threshold: f64,
}

impl ScenarioClassifier {
    pub fn new(config: &AeroConfig) -> Self {
        Self::with_thresholds(
            config.straight_threshold,
            config.turn_threshold,
            config.lateral_g_threshold,
        )
    }

    pub fn with_thresholds(straight: f64, turn: f64, lateral_g: f64) -> Self {
        Self {
            straight_threshold: straight,
            turn_threshold: turn,
            lateral_g_threshold: lateral_g,
        }
    }

    pub fn classify(&self, steering: f64, lateral_g: f64) -> Scenario {
        if steering.abs() < self.straight_threshold && lateral_g.abs() < self.lateral_g_threshold {
            Scenario::Straight
        } else if steering >= self.turn_threshold || lateral_g >= self.lateral_g_threshold {
            Scenario::TurnLeft
        } else if steering <= -self.turn_threshold || lateral_g <= -self.lateral_g_threshold {
            Scenario::TurnRight
        } else {
            Scenario::Straight
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> ScenarioClassifier {
        ScenarioClassifier::with_thresholds(1.0, 3.0, 0.5)
    }

    #[test]
    fn centered_inputs_are_straight() {
        assert_eq!(classifier().classify(0.0, 0.0), Scenario::Straight);
    }

    #[test]
    fn steering_beyond_turn_threshold_sets_direction() {
        assert_eq!(classifier().classify(5.0, 0.0), Scenario::TurnLeft);
        assert_eq!(classifier().classify(-5.0, 0.0), Scenario::TurnRight);
        assert_eq!(classifier().classify(3.0, 0.0), Scenario::TurnLeft);
        assert_eq!(classifier().classify(-3.0, 0.0), Scenario::TurnRight);
    }

    #[test]
    fn dead_zone_falls_back_to_straight() {
        assert_eq!(classifier().classify(1.5, 0.0), Scenario::Straight);
        assert_eq!(classifier().classify(-2.9, 0.0), Scenario::Straight);
    }

    #[test]
    fn lateral_g_alone_can_mark_a_turn() {
        assert_eq!(classifier().classify(0.0, 0.6), Scenario::TurnLeft);
        assert_eq!(classifier().classify(0.0, -0.6), Scenario::TurnRight);
    }

    #[test]
    fn left_rule_takes_precedence_over_right() {
        // steering says right, lateral load says left
        assert_eq!(classifier().classify(-5.0, 0.6), Scenario::TurnLeft);
    }

    #[test]
    fn classification_is_repeatable() {
        let c = classifier();
        for (steering, lateral) in [(0.2, 0.1), (4.0, -0.2), (-1.2, 0.0), (0.0, -0.9)] {
            assert_eq!(c.classify(steering, lateral), c.classify(steering, lateral));
        }
    }

    #[test]
    fn default_thresholds_follow_config() {
        let c = ScenarioClassifier::new(&AeroConfig::default());
        assert_eq!(c.classify(0.05, 0.1), Scenario::Straight);
        assert_eq!(c.classify(0.35, 0.0), Scenario::TurnLeft);
        assert_eq!(c.classify(-0.35, 0.0), Scenario::TurnRight);
        assert_eq!(c.classify(0.2, 0.0), Scenario::Straight);
    }
}
