//! Construction parameters for participants.
//!
//! Defaults match the classic setups: unit mass and specific heat at 0 K,
//! 400 W heat sources, and half-kilogram faces on two-sided slabs.

use rl_core::units::{Power, Temperature, emissive_power};

use crate::error::{SimError, SimResult};
use crate::participant::{
    Blackbody, HeatSource, Participant, ParticipantKind, TwoSidedBlackbody, Void,
};
use crate::thermal::ThermalBody;

#[derive(Clone, Debug, PartialEq)]
pub struct BlackbodySpec {
    pub temperature_k: f64,
    pub mass_kg: f64,
    pub specific_heat_j_per_kg_k: f64,
}

impl Default for BlackbodySpec {
    fn default() -> Self {
        Self {
            temperature_k: 0.0,
            mass_kg: 1.0,
            specific_heat_j_per_kg_k: 1.0,
        }
    }
}

impl BlackbodySpec {
    pub fn at(temperature: Temperature) -> Self {
        use uom::si::thermodynamic_temperature::kelvin;
        Self {
            temperature_k: temperature.get::<kelvin>(),
            ..Self::default()
        }
    }

    pub fn with_mass_kg(mut self, mass_kg: f64) -> Self {
        self.mass_kg = mass_kg;
        self
    }

    pub fn with_specific_heat(mut self, specific_heat_j_per_kg_k: f64) -> Self {
        self.specific_heat_j_per_kg_k = specific_heat_j_per_kg_k;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeatSourceSpec {
    pub power_w: f64,
    pub body: BlackbodySpec,
}

impl Default for HeatSourceSpec {
    fn default() -> Self {
        Self {
            power_w: 400.0,
            body: BlackbodySpec::default(),
        }
    }
}

impl HeatSourceSpec {
    pub fn with_power(power: Power) -> Self {
        use uom::si::power::watt;
        Self {
            power_w: power.get::<watt>(),
            ..Self::default()
        }
    }

    pub fn with_body(mut self, body: BlackbodySpec) -> Self {
        self.body = body;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TwoSidedSpec {
    pub left: BlackbodySpec,
    pub right: BlackbodySpec,
    pub conductivity_w_per_m_k: f64,
    pub area_m2: f64,
    pub width_m: f64,
}

impl Default for TwoSidedSpec {
    fn default() -> Self {
        let face = BlackbodySpec::default().with_mass_kg(0.5);
        Self {
            left: face.clone(),
            right: face,
            conductivity_w_per_m_k: 5.0,
            area_m2: 1.0,
            width_m: 1.0,
        }
    }
}

impl TwoSidedSpec {
    pub fn with_conductivity(mut self, conductivity_w_per_m_k: f64) -> Self {
        self.conductivity_w_per_m_k = conductivity_w_per_m_k;
        self
    }

    pub fn with_temperatures(mut self, left_k: f64, right_k: f64) -> Self {
        self.left.temperature_k = left_k;
        self.right.temperature_k = right_k;
        self
    }
}

/// One slot of a topology, before validation.
#[derive(Clone, Debug, PartialEq)]
pub enum ParticipantSpec {
    Mirror,
    Void,
    Blackbody(BlackbodySpec),
    HeatSource(HeatSourceSpec),
    TwoSidedBlackbody(TwoSidedSpec),
}

impl ParticipantSpec {
    pub fn kind(&self) -> ParticipantKind {
        match self {
            ParticipantSpec::Mirror => ParticipantKind::Mirror,
            ParticipantSpec::Void => ParticipantKind::Void,
            ParticipantSpec::Blackbody(_) => ParticipantKind::Blackbody,
            ParticipantSpec::HeatSource(_) => ParticipantKind::HeatSource,
            ParticipantSpec::TwoSidedBlackbody(_) => ParticipantKind::TwoSidedBlackbody,
        }
    }

    /// Validate and instantiate the participant for slot `index`.
    pub fn build(&self, index: usize) -> SimResult<Participant> {
        let kind = self.kind();
        let check = Checker { index, kind };
        let participant = match self {
            ParticipantSpec::Mirror => Participant::Mirror,
            ParticipantSpec::Void => Participant::Void(Void::new()),
            ParticipantSpec::Blackbody(spec) => Participant::Blackbody(Blackbody::new(
                check.body(spec, &SINGLE)?,
            )),
            ParticipantSpec::HeatSource(spec) => {
                let body = check.body(&spec.body, &SINGLE)?;
                let power_w = check.non_negative(spec.power_w, "power_w must be non-negative")?;
                Participant::HeatSource(HeatSource::new(body, power_w))
            }
            ParticipantSpec::TwoSidedBlackbody(spec) => {
                let left = check.body(&spec.left, &LEFT_FACE)?;
                let right = check.body(&spec.right, &RIGHT_FACE)?;
                let conductivity = check.non_negative(
                    spec.conductivity_w_per_m_k,
                    "conductivity must be non-negative",
                )?;
                let area = check.non_negative(spec.area_m2, "area_m2 must be non-negative")?;
                let width = check.positive(spec.width_m, "width_m must be positive")?;
                Participant::TwoSidedBlackbody(TwoSidedBlackbody::new(
                    left,
                    right,
                    conductivity,
                    area,
                    width,
                ))
            }
        };
        Ok(participant)
    }
}

/// Error labels for the parameters of one thermal body.
struct BodyFields {
    temperature: &'static str,
    mass: &'static str,
    specific_heat: &'static str,
    heat_capacity: &'static str,
}

const SINGLE: BodyFields = BodyFields {
    temperature: "temperature_k",
    mass: "mass_kg",
    specific_heat: "specific_heat",
    heat_capacity: "heat capacity",
};

const LEFT_FACE: BodyFields = BodyFields {
    temperature: "temperature_left_k",
    mass: "mass_left_kg",
    specific_heat: "specific_heat_left",
    heat_capacity: "heat capacity (left face)",
};

const RIGHT_FACE: BodyFields = BodyFields {
    temperature: "temperature_right_k",
    mass: "mass_right_kg",
    specific_heat: "specific_heat_right",
    heat_capacity: "heat capacity (right face)",
};

struct Checker {
    index: usize,
    kind: ParticipantKind,
}

impl Checker {
    fn fail(&self, what: &'static str, value: f64) -> SimError {
        SimError::InvalidParticipant {
            index: self.index,
            kind: self.kind,
            what,
            value,
        }
    }

    fn positive(&self, value: f64, what: &'static str) -> SimResult<f64> {
        rl_core::ensure_positive(value, what).map_err(|_| self.fail(what, value))
    }

    fn non_negative(&self, value: f64, what: &'static str) -> SimResult<f64> {
        rl_core::ensure_non_negative(value, what).map_err(|_| self.fail(what, value))
    }

    fn body(&self, spec: &BlackbodySpec, fields: &BodyFields) -> SimResult<ThermalBody> {
        let temperature_k = self.non_negative(spec.temperature_k, fields.temperature)?;
        // σT⁴ overflows long before T itself does.
        if !emissive_power(temperature_k).is_finite() {
            return Err(self.fail(fields.temperature, temperature_k));
        }
        let mass_kg = self.positive(spec.mass_kg, fields.mass)?;
        let specific_heat = self.positive(spec.specific_heat_j_per_kg_k, fields.specific_heat)?;
        // Both factors can be tiny enough for the product to underflow to zero.
        self.positive(mass_kg * specific_heat, fields.heat_capacity)?;
        Ok(ThermalBody::new(temperature_k, mass_kg, specific_heat))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rl_core::units::{k, w};

    #[test]
    fn defaults_match_classic_setup() {
        let bb = BlackbodySpec::default();
        assert_eq!((bb.temperature_k, bb.mass_kg, bb.specific_heat_j_per_kg_k), (0.0, 1.0, 1.0));
        assert_eq!(HeatSourceSpec::default().power_w, 400.0);
        let slab = TwoSidedSpec::default();
        assert_eq!(slab.left.mass_kg, 0.5);
        assert_eq!(slab.right.mass_kg, 0.5);
        assert_eq!(slab.conductivity_w_per_m_k, 5.0);
        assert_eq!((slab.area_m2, slab.width_m), (1.0, 1.0));
    }

    #[test]
    fn unit_constructors() {
        assert_eq!(BlackbodySpec::at(k(500.0)).temperature_k, 500.0);
        assert_eq!(HeatSourceSpec::with_power(w(200.0)).power_w, 200.0);
    }

    #[test]
    fn rejects_non_positive_heat_capacity() {
        let spec = ParticipantSpec::Blackbody(BlackbodySpec::default().with_mass_kg(0.0));
        let err = spec.build(3).unwrap_err();
        match err {
            SimError::InvalidParticipant { index, kind, what, .. } => {
                assert_eq!(index, 3);
                assert_eq!(kind, ParticipantKind::Blackbody);
                assert_eq!(what, "mass_kg");
            }
            other => panic!("unexpected error: {other}"),
        }

        let spec = ParticipantSpec::Blackbody(BlackbodySpec::default().with_specific_heat(-1.0));
        assert!(spec.build(0).is_err());
    }

    #[test]
    fn rejects_negative_wattage() {
        let spec = ParticipantSpec::HeatSource(HeatSourceSpec {
            power_w: -1.0,
            ..HeatSourceSpec::default()
        });
        assert!(matches!(
            spec.build(0),
            Err(SimError::InvalidParticipant { kind: ParticipantKind::HeatSource, .. })
        ));
    }

    #[test]
    fn rejects_bad_slab_geometry() {
        let negative_k = TwoSidedSpec::default().with_conductivity(-0.1);
        assert!(ParticipantSpec::TwoSidedBlackbody(negative_k).build(0).is_err());

        let zero_width = TwoSidedSpec {
            width_m: 0.0,
            ..TwoSidedSpec::default()
        };
        assert!(ParticipantSpec::TwoSidedBlackbody(zero_width).build(0).is_err());

        let negative_area = TwoSidedSpec {
            area_m2: -1.0,
            ..TwoSidedSpec::default()
        };
        assert!(ParticipantSpec::TwoSidedBlackbody(negative_area).build(0).is_err());

        let insulated = TwoSidedSpec::default().with_conductivity(0.0);
        assert!(ParticipantSpec::TwoSidedBlackbody(insulated).build(0).is_ok());
    }

    #[test]
    fn rejects_negative_or_nan_temperature() {
        let cold = ParticipantSpec::Blackbody(BlackbodySpec {
            temperature_k: -1.0,
            ..BlackbodySpec::default()
        });
        assert!(cold.build(0).is_err());

        let nan = ParticipantSpec::TwoSidedBlackbody(
            TwoSidedSpec::default().with_temperatures(f64::NAN, 0.0),
        );
        assert!(nan.build(0).is_err());
    }

    #[test]
    fn rejects_heat_capacity_that_underflows() {
        let tiny = ParticipantSpec::Blackbody(
            BlackbodySpec::at(k(300.0))
                .with_mass_kg(1e-200)
                .with_specific_heat(1e-200),
        );
        match tiny.build(1) {
            Err(SimError::InvalidParticipant { index, what, value, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(what, "heat capacity");
                assert_eq!(value, 0.0);
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let tiny_face = BlackbodySpec::default()
            .with_mass_kg(1e-200)
            .with_specific_heat(1e-200);
        let left = TwoSidedSpec {
            left: tiny_face.clone(),
            ..TwoSidedSpec::default()
        };
        assert!(matches!(
            ParticipantSpec::TwoSidedBlackbody(left).build(0),
            Err(SimError::InvalidParticipant { what: "heat capacity (left face)", .. })
        ));
        let right = TwoSidedSpec {
            right: tiny_face,
            ..TwoSidedSpec::default()
        };
        assert!(matches!(
            ParticipantSpec::TwoSidedBlackbody(right).build(0),
            Err(SimError::InvalidParticipant { what: "heat capacity (right face)", .. })
        ));

        // Small but representable products still build.
        let small = ParticipantSpec::Blackbody(
            BlackbodySpec::default()
                .with_mass_kg(1e-100)
                .with_specific_heat(1e-100),
        );
        assert!(small.build(0).is_ok());
    }

    #[test]
    fn rejects_temperature_whose_emission_overflows() {
        let scorching = ParticipantSpec::Blackbody(BlackbodySpec::at(k(1e80)));
        assert!(matches!(
            scorching.build(2),
            Err(SimError::InvalidParticipant { index: 2, what: "temperature_k", .. })
        ));

        let slab = TwoSidedSpec::default().with_temperatures(300.0, 1e80);
        assert!(matches!(
            ParticipantSpec::TwoSidedBlackbody(slab).build(0),
            Err(SimError::InvalidParticipant { what: "temperature_right_k", .. })
        ));

        let hot = ParticipantSpec::Blackbody(BlackbodySpec::at(k(1e20)));
        assert!(hot.build(0).is_ok());
    }
}
