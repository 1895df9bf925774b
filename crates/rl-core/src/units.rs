// rl-core/src/units.rs

use uom::si::f64::{
    Area as UomArea, Energy as UomEnergy, Length as UomLength, Mass as UomMass,
    Power as UomPower, ThermodynamicTemperature as UomThermodynamicTemperature, Time as UomTime,
};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type Energy = UomEnergy;
pub type Length = UomLength;
pub type Mass = UomMass;
pub type Power = UomPower;
pub type Temperature = UomThermodynamicTemperature;
pub type Time = UomTime;

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn kg(v: f64) -> Mass {
    use uom::si::mass::kilogram;
    Mass::new::<kilogram>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn m2(v: f64) -> Area {
    use uom::si::area::square_meter;
    Area::new::<square_meter>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn ms(v: f64) -> Time {
    use uom::si::time::millisecond;
    Time::new::<millisecond>(v)
}

#[inline]
pub fn w(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

#[inline]
pub fn j(v: f64) -> Energy {
    use uom::si::energy::joule;
    Energy::new::<joule>(v)
}

pub mod constants {
    /// Stefan-Boltzmann constant, W/(m²·K⁴).
    pub const STEFAN_BOLTZMANN: f64 = 5.67e-8;

    /// One millisecond of physical time per tick.
    pub const DEFAULT_TIMESTEP_S: f64 = 1e-3;
}

/// Radiant exitance (W/m²) of a black surface at `temperature_k`.
#[inline]
pub fn emissive_power(temperature_k: f64) -> f64 {
    constants::STEFAN_BOLTZMANN * temperature_k.powi(4)
}

/// Energy (J per unit area) radiated by one face over `dt_s`.
#[inline]
pub fn radiant_energy(temperature_k: f64, dt_s: f64) -> f64 {
    emissive_power(temperature_k) * dt_s
}
