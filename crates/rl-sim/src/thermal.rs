//! Sides, per-side energy pairs and lumped thermal bodies.

use rl_core::clamp_non_negative;

/// Face of a participant. Left points toward index 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Energy in joules split by side.
///
/// Used both for incoming radiation buffers and for the last tick's emission.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideEnergy {
    pub left_j: f64,
    pub right_j: f64,
}

impl SideEnergy {
    pub fn new(left_j: f64, right_j: f64) -> Self {
        Self { left_j, right_j }
    }

    pub fn get(&self, side: Side) -> f64 {
        match side {
            Side::Left => self.left_j,
            Side::Right => self.right_j,
        }
    }

    pub fn add(&mut self, side: Side, energy_j: f64) {
        match side {
            Side::Left => self.left_j += energy_j,
            Side::Right => self.right_j += energy_j,
        }
    }

    pub fn total(&self) -> f64 {
        self.left_j + self.right_j
    }

    /// Return the contents and reset to zero.
    pub fn take(&mut self) -> SideEnergy {
        std::mem::take(self)
    }
}

/// Lumped thermal mass: temperature, mass and specific heat.
#[derive(Clone, Debug, PartialEq)]
pub struct ThermalBody {
    temperature_k: f64,
    mass_kg: f64,
    specific_heat_j_per_kg_k: f64,
}

impl ThermalBody {
    /// Caller guarantees a positive heat capacity and non-negative temperature.
    pub(crate) fn new(temperature_k: f64, mass_kg: f64, specific_heat_j_per_kg_k: f64) -> Self {
        Self {
            temperature_k,
            mass_kg,
            specific_heat_j_per_kg_k,
        }
    }

    pub fn temperature_k(&self) -> f64 {
        self.temperature_k
    }

    pub fn mass_kg(&self) -> f64 {
        self.mass_kg
    }

    pub fn specific_heat_j_per_kg_k(&self) -> f64 {
        self.specific_heat_j_per_kg_k
    }

    /// m·c in J/K.
    pub fn heat_capacity(&self) -> f64 {
        self.mass_kg * self.specific_heat_j_per_kg_k
    }

    /// E = m·c·T
    pub fn energy_j(&self) -> f64 {
        self.heat_capacity() * self.temperature_k
    }

    /// Apply ΔT = Q / (m·c), clamping at 0 K.
    ///
    /// Returns the energy (J) the clamp had to create; zero in normal operation.
    pub fn add_energy(&mut self, energy_j: f64) -> f64 {
        let capacity = self.heat_capacity();
        let (temperature_k, deficit_k) =
            clamp_non_negative(self.temperature_k + energy_j / capacity);
        self.temperature_k = temperature_k;
        deficit_k * capacity
    }

    pub fn remove_energy(&mut self, energy_j: f64) -> f64 {
        self.add_energy(-energy_j)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_opposite_is_involution() {
        for side in Side::BOTH {
            assert_eq!(side.opposite().opposite(), side);
            assert_ne!(side.opposite(), side);
        }
    }

    #[test]
    fn take_resets_buffer() {
        let mut buf = SideEnergy::default();
        buf.add(Side::Left, 1.5);
        buf.add(Side::Right, 0.5);
        buf.add(Side::Left, 1.0);
        let taken = buf.take();
        assert_eq!(taken, SideEnergy::new(2.5, 0.5));
        assert_eq!(taken.total(), 3.0);
        assert_eq!(buf, SideEnergy::default());
    }

    #[test]
    fn add_energy_uses_heat_capacity() {
        let mut body = ThermalBody::new(100.0, 2.0, 4.0);
        assert_eq!(body.heat_capacity(), 8.0);
        assert_eq!(body.add_energy(16.0), 0.0);
        assert_eq!(body.temperature_k(), 102.0);
        assert_eq!(body.energy_j(), 816.0);
    }

    #[test]
    fn remove_energy_clamps_and_reports_created_energy() {
        let mut body = ThermalBody::new(1.0, 1.0, 1.0);
        let created = body.remove_energy(3.0);
        assert_eq!(body.temperature_k(), 0.0);
        assert_eq!(created, 2.0);
    }
}
