//! Semantic unit types for type-safe physical quantity handling
//!
//! Newtype wrappers over `f64` in canonical SI units (kg, m³, K, J, m², s).
//! The wrappers exist to prevent accidental mixing of incompatible
//! quantities: `Kilograms + Kelvin` does not compile, and the only
//! cross-type operators provided are the physically meaningful ones
//! (`Watts * Seconds = Joules`, `Kelvin - Kelvin = KelvinDelta`, ...).
//!
//! # Design
//! - All quantities use f64; energy bookkeeping must stay exact enough
//!   for conservation checks over long runs
//! - Constructors validate physical bounds (no negative mass, no
//!   temperature below absolute zero) and panic on violation; out-of-range
//!   values at these call sites are programming errors, not data errors
//! - Total ordering via `total_cmp` (NaN sorts greater than all values)
//! - `Deref` to the raw float for read access in numeric hot paths

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Deref, Div, Mul, Neg, Sub, SubAssign};

/// Compare f64 values with total ordering using Rust's built-in `total_cmp`
#[inline]
fn f64_total_cmp(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

// ============================================================================
// TEMPERATURE TYPES
// ============================================================================

/// Absolute temperature in Kelvin
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Kelvin(f64);

impl Eq for Kelvin {}

impl PartialOrd for Kelvin {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Kelvin {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Kelvin {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Kelvin {
    /// Absolute zero
    pub const ABSOLUTE_ZERO: Kelvin = Kelvin(0.0);

    /// Create a new Kelvin temperature. Asserts value >= absolute zero (0 K).
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(
            value >= 0.0,
            "Kelvin::new: value is below absolute zero (0 K)"
        );
        Kelvin(value)
    }

    /// Create without validation.
    /// # Safety
    /// Caller must ensure value >= 0 (absolute zero).
    #[inline]
    #[must_use]
    pub const unsafe fn new_unchecked(value: f64) -> Self {
        Kelvin(value)
    }

    /// Convert to Celsius
    #[inline]
    #[must_use]
    pub fn to_celsius(self) -> Celsius {
        Celsius::new(self.0 - Celsius::CELSIUS_KELVIN_OFFSET)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<Kelvin> for f64 {
    fn from(k: Kelvin) -> f64 {
        k.0
    }
}

// Kelvin - Kelvin = KelvinDelta (difference between two absolute temperatures)
impl Sub for Kelvin {
    type Output = KelvinDelta;
    fn sub(self, rhs: Kelvin) -> KelvinDelta {
        KelvinDelta(self.0 - rhs.0)
    }
}

// Kelvin + KelvinDelta = Kelvin
impl Add<KelvinDelta> for Kelvin {
    type Output = Kelvin;
    fn add(self, rhs: KelvinDelta) -> Kelvin {
        let result = self.0 + rhs.0;
        assert!(
            result >= *Kelvin::ABSOLUTE_ZERO,
            "Temperature below absolute zero: {result:.2} K"
        );
        Kelvin(result)
    }
}

// Kelvin - KelvinDelta = Kelvin
impl Sub<KelvinDelta> for Kelvin {
    type Output = Kelvin;
    fn sub(self, rhs: KelvinDelta) -> Kelvin {
        let result = self.0 - rhs.0;
        assert!(
            result >= *Kelvin::ABSOLUTE_ZERO,
            "Temperature below absolute zero: {result:.2} K"
        );
        Kelvin(result)
    }
}

impl fmt::Display for Kelvin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} K", self.0)
    }
}

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Celsius(f64);

impl Eq for Celsius {}

impl PartialOrd for Celsius {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Celsius {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Celsius {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Celsius {
    /// Celsius to Kelvin conversion offset (0°C = 273.15 K)
    pub(crate) const CELSIUS_KELVIN_OFFSET: f64 = 273.15;

    /// Absolute zero in Celsius
    pub const ABSOLUTE_ZERO: Celsius = Celsius(-273.15);

    /// Create a new Celsius temperature. Asserts value >= absolute zero (-273.15°C).
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(
            value >= -Self::CELSIUS_KELVIN_OFFSET,
            "Celsius::new: value is below absolute zero (-273.15 C)"
        );
        Celsius(value)
    }

    /// Convert to Kelvin
    #[inline]
    #[must_use]
    pub fn to_kelvin(self) -> Kelvin {
        Kelvin(self.0 + Self::CELSIUS_KELVIN_OFFSET)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<Celsius> for Kelvin {
    fn from(c: Celsius) -> Kelvin {
        c.to_kelvin()
    }
}

impl From<Kelvin> for Celsius {
    fn from(k: Kelvin) -> Celsius {
        k.to_celsius()
    }
}

impl fmt::Display for Celsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}°C", self.0)
    }
}

/// Temperature difference in Kelvin; can be positive or negative
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct KelvinDelta(f64);

impl Eq for KelvinDelta {}

impl PartialOrd for KelvinDelta {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for KelvinDelta {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for KelvinDelta {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl KelvinDelta {
    /// Create a temperature delta (any value)
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        KelvinDelta(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Absolute value of the delta
    #[inline]
    #[must_use]
    pub fn abs(self) -> Self {
        KelvinDelta(self.0.abs())
    }
}

impl Neg for KelvinDelta {
    type Output = KelvinDelta;
    fn neg(self) -> KelvinDelta {
        KelvinDelta(-self.0)
    }
}

impl Add for KelvinDelta {
    type Output = KelvinDelta;
    fn add(self, rhs: KelvinDelta) -> KelvinDelta {
        KelvinDelta(self.0 + rhs.0)
    }
}

impl Sub for KelvinDelta {
    type Output = KelvinDelta;
    fn sub(self, rhs: KelvinDelta) -> KelvinDelta {
        KelvinDelta(self.0 - rhs.0)
    }
}

impl Mul<f64> for KelvinDelta {
    type Output = KelvinDelta;
    fn mul(self, rhs: f64) -> KelvinDelta {
        KelvinDelta(self.0 * rhs)
    }
}

impl Div<f64> for KelvinDelta {
    type Output = KelvinDelta;
    fn div(self, rhs: f64) -> KelvinDelta {
        KelvinDelta(self.0 / rhs)
    }
}

impl fmt::Display for KelvinDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} K", self.0)
    }
}

// ============================================================================
// MASS
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Kilograms(f64);

impl Eq for Kilograms {}

impl PartialOrd for Kilograms {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Kilograms {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Kilograms {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Kilograms {
    /// Create a new mass in kilograms. Asserts value >= 0.
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(value >= 0.0, "Kilograms::new: negative mass is invalid");
        Kilograms(value)
    }

    /// Create from grams
    #[inline]
    #[must_use]
    pub fn from_grams(grams: f64) -> Self {
        Kilograms::new(grams / 1000.0)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Add for Kilograms {
    type Output = Kilograms;
    fn add(self, rhs: Kilograms) -> Kilograms {
        Kilograms(self.0 + rhs.0)
    }
}

impl Sub for Kilograms {
    type Output = Kilograms;
    fn sub(self, rhs: Kilograms) -> Kilograms {
        let result = self.0 - rhs.0;
        assert!(result >= 0.0, "Negative mass: {result:.6} kg");
        Kilograms(result)
    }
}

impl Mul<f64> for Kilograms {
    type Output = Kilograms;
    fn mul(self, rhs: f64) -> Kilograms {
        Kilograms(self.0 * rhs)
    }
}

impl Div<f64> for Kilograms {
    type Output = Kilograms;
    fn div(self, rhs: f64) -> Kilograms {
        Kilograms(self.0 / rhs)
    }
}

impl fmt::Display for Kilograms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} kg", self.0)
    }
}

// ============================================================================
// GEOMETRY: VOLUME, AREA, DISTANCE
// ============================================================================

/// Volume in cubic meters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct CubicMeters(f64);

impl Eq for CubicMeters {}

impl PartialOrd for CubicMeters {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CubicMeters {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for CubicMeters {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl CubicMeters {
    /// Create a new volume. Asserts value >= 0.
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(value >= 0.0, "CubicMeters::new: negative volume is invalid");
        CubicMeters(value)
    }

    /// Area of one face of the cube of equal volume: `(v^(1/3))^2`.
    ///
    /// The diffusion model treats every volume element as a cube and
    /// exchanges heat through one cube face per neighbor.
    #[inline]
    #[must_use]
    pub fn cube_face_area(self) -> SquareMeters {
        SquareMeters::new(self.0.cbrt().powi(2))
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Add for CubicMeters {
    type Output = CubicMeters;
    fn add(self, rhs: CubicMeters) -> CubicMeters {
        CubicMeters(self.0 + rhs.0)
    }
}

impl Mul<f64> for CubicMeters {
    type Output = CubicMeters;
    fn mul(self, rhs: f64) -> CubicMeters {
        CubicMeters(self.0 * rhs)
    }
}

impl fmt::Display for CubicMeters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} m³", self.0)
    }
}

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct SquareMeters(f64);

impl Eq for SquareMeters {}

impl PartialOrd for SquareMeters {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SquareMeters {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for SquareMeters {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl SquareMeters {
    /// Create a new area. Asserts value >= 0.
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(value >= 0.0, "SquareMeters::new: negative area is invalid");
        SquareMeters(value)
    }

    /// Smaller of two areas
    #[inline]
    #[must_use]
    pub fn min(self, other: SquareMeters) -> SquareMeters {
        if self.0 <= other.0 {
            self
        } else {
            other
        }
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for SquareMeters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} m²", self.0)
    }
}

/// Distance in meters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Meters(f64);

impl Eq for Meters {}

impl PartialOrd for Meters {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Meters {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Meters {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Meters {
    /// Create a new distance in meters. Asserts value >= 0.
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(value >= 0.0, "Meters::new: negative distance is invalid");
        Meters(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Meters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} m", self.0)
    }
}

// ============================================================================
// ENERGY / POWER / TIME
// ============================================================================

/// Energy in joules
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Joules(f64);

impl Eq for Joules {}

impl PartialOrd for Joules {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Joules {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Joules {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Joules {
    /// Create a new energy amount. Asserts value >= 0.
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(value >= 0.0, "Joules::new: negative energy is invalid");
        Joules(value)
    }

    /// Create without validation.
    /// # Safety
    /// Caller must ensure value >= 0 (energy stores are non-negative).
    #[inline]
    #[must_use]
    pub const unsafe fn new_unchecked(value: f64) -> Self {
        Joules(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Smaller of two energies
    #[inline]
    #[must_use]
    pub fn min(self, other: Joules) -> Joules {
        if self.0 <= other.0 {
            self
        } else {
            other
        }
    }
}

impl Add for Joules {
    type Output = Joules;
    fn add(self, rhs: Joules) -> Joules {
        Joules(self.0 + rhs.0)
    }
}

impl AddAssign for Joules {
    fn add_assign(&mut self, rhs: Joules) {
        self.0 += rhs.0;
    }
}

impl Sub for Joules {
    type Output = Joules;
    fn sub(self, rhs: Joules) -> Joules {
        let result = self.0 - rhs.0;
        assert!(result >= 0.0, "Negative energy store: {result:.6} J");
        Joules(result)
    }
}

impl SubAssign for Joules {
    fn sub_assign(&mut self, rhs: Joules) {
        // Stores clamp at zero; emission paths check remaining reserve first
        self.0 = (self.0 - rhs.0).max(0.0);
    }
}

impl Mul<f64> for Joules {
    type Output = Joules;
    fn mul(self, rhs: f64) -> Joules {
        Joules(self.0 * rhs)
    }
}

impl Div<f64> for Joules {
    type Output = Joules;
    fn div(self, rhs: f64) -> Joules {
        Joules(self.0 / rhs)
    }
}

impl fmt::Display for Joules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3e} J", self.0)
    }
}

/// Power in watts (J/s)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Watts(f64);

impl Eq for Watts {}

impl PartialOrd for Watts {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Watts {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Watts {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Watts {
    /// Create a new power value. Asserts value >= 0.
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(value >= 0.0, "Watts::new: negative power is invalid");
        Watts(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

// Cross-type operation: power × time = energy
impl Mul<Seconds> for Watts {
    type Output = Joules;
    fn mul(self, rhs: Seconds) -> Joules {
        Joules(self.0 * rhs.0)
    }
}

// Cross-type operation: time × power = energy
impl Mul<Watts> for Seconds {
    type Output = Joules;
    fn mul(self, rhs: Watts) -> Joules {
        Joules(self.0 * rhs.0)
    }
}

impl fmt::Display for Watts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3e} W", self.0)
    }
}

/// Time duration in seconds
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Seconds(f64);

impl Eq for Seconds {}

impl PartialOrd for Seconds {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Seconds {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Seconds {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Seconds {
    /// Create a new duration in seconds. Asserts value >= 0.
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(value >= 0.0, "Seconds::new: negative duration is invalid");
        Seconds(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Add for Seconds {
    type Output = Seconds;
    fn add(self, rhs: Seconds) -> Seconds {
        Seconds(self.0 + rhs.0)
    }
}

impl Mul<f64> for Seconds {
    type Output = Seconds;
    fn mul(self, rhs: f64) -> Seconds {
        Seconds(self.0 * rhs)
    }
}

impl fmt::Display for Seconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} s", self.0)
    }
}

// ============================================================================
// CONCENTRATION AND MATERIAL COEFFICIENTS
// ============================================================================

/// Trace-gas concentration in parts per million by volume
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Ppmv(f64);

impl Eq for Ppmv {}

impl PartialOrd for Ppmv {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ppmv {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Ppmv {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Ppmv {
    /// Create a new concentration. Asserts value >= 0.
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(value >= 0.0, "Ppmv::new: negative concentration is invalid");
        Ppmv(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Add for Ppmv {
    type Output = Ppmv;
    fn add(self, rhs: Ppmv) -> Ppmv {
        Ppmv(self.0 + rhs.0)
    }
}

impl Sub for Ppmv {
    type Output = Ppmv;
    fn sub(self, rhs: Ppmv) -> Ppmv {
        // Concentration floors at zero
        Ppmv((self.0 - rhs.0).max(0.0))
    }
}

impl fmt::Display for Ppmv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} ppmv", self.0)
    }
}

/// Specific heat capacity in J/(kg·K)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct JoulesPerKgKelvin(f64);

impl Eq for JoulesPerKgKelvin {}

impl PartialOrd for JoulesPerKgKelvin {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for JoulesPerKgKelvin {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for JoulesPerKgKelvin {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl JoulesPerKgKelvin {
    /// Create a new specific heat capacity. Asserts value > 0 (zero would
    /// make temperature undefined).
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(
            value > 0.0,
            "JoulesPerKgKelvin::new: specific heat capacity must be positive"
        );
        JoulesPerKgKelvin(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for JoulesPerKgKelvin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} J/(kg·K)", self.0)
    }
}

/// Heat transfer coefficient for Newton's law of cooling, W/(m²·K)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct WattsPerSquareMeterKelvin(f64);

impl Eq for WattsPerSquareMeterKelvin {}

impl PartialOrd for WattsPerSquareMeterKelvin {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WattsPerSquareMeterKelvin {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for WattsPerSquareMeterKelvin {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl WattsPerSquareMeterKelvin {
    /// Create a new heat transfer coefficient. Asserts value >= 0.
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(
            value >= 0.0,
            "WattsPerSquareMeterKelvin::new: negative coefficient is invalid"
        );
        WattsPerSquareMeterKelvin(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for WattsPerSquareMeterKelvin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} W/(m²·K)", self.0)
    }
}
