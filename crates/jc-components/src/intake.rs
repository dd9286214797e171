//! Intake model.

use crate::state::GasState;
use crate::traits::Stage;

/// Ideal intake: hands the ambient state to the compressor unchanged.
///
/// Ram compression and inlet losses are not modelled; a static engine
/// ingests air at ambient conditions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Intake;

impl Intake {
    pub fn new() -> Self {
        Self
    }

    pub fn pass(&self, ambient: &GasState) -> GasState {
        *ambient
    }
}

impl Stage for Intake {
    fn name(&self) -> &'static str {
        "intake"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jc_core::units::{k, kgps, kpa};
    use jc_props::TabulatedAir;

    #[test]
    fn intake_is_pass_through() {
        let air = TabulatedAir::standard().unwrap();
        let ambient = GasState::from_temperature(&air, k(293.15), kpa(101.3), kgps(0.23)).unwrap();
        assert_eq!(Intake::new().pass(&ambient), ambient);
        assert_eq!(Intake.name(), "intake");
    }
}
