//! Universe orchestrator: body registry, visibility discovery, and
//! radiation routing
//!
//! The universe is an explicit dependency, constructed once and passed
//! by reference; nothing here is global. Visibility between bodies is a
//! rule over body kinds, resolved lazily on first query and cached
//! symmetrically in both bodies.

use crate::celestial::body::{BodyId, BodyKind, BodyState, CelestialBody};
use crate::core_types::{Joules, Meters, Seconds};
use crate::error::{Result, SimError};
use nalgebra::Vector3;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::{debug, info};

/// Visibility rule keyed by unordered kind pair.
///
/// The default table lets stars and planets see each other and nothing
/// else; same-kind pairs are mutually occluded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisibilityTable {
    rules: FxHashMap<(BodyKind, BodyKind), bool>,
}

impl VisibilityTable {
    /// Table with no rules; unlisted pairs are not visible
    #[must_use]
    pub fn empty() -> Self {
        Self {
            rules: FxHashMap::default(),
        }
    }

    /// Declare visibility for an unordered kind pair
    pub fn set(&mut self, a: BodyKind, b: BodyKind, visible: bool) {
        self.rules.insert(Self::key(a, b), visible);
    }

    /// Whether two kinds can see each other
    #[must_use]
    pub fn visible(&self, a: BodyKind, b: BodyKind) -> bool {
        self.rules.get(&Self::key(a, b)).copied().unwrap_or(false)
    }

    fn key(a: BodyKind, b: BodyKind) -> (BodyKind, BodyKind) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

impl Default for VisibilityTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.set(BodyKind::Star, BodyKind::Planet, true);
        table
    }
}

/// How radiated energy divides among the receivers in sight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RadiationPolicy {
    /// Each receiver gets `solid_angle / 4π` of the emission; the rest
    /// escapes into space
    #[default]
    PerReceiver,
    /// Per-receiver fractions are rescaled to sum to one, so the full
    /// emission lands on the receivers
    Renormalize,
}

/// Registry of celestial bodies plus the radiation tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Universe {
    bodies: Vec<CelestialBody>,
    visibility: VisibilityTable,
    policy: RadiationPolicy,
}

impl Universe {
    #[must_use]
    pub fn new(visibility: VisibilityTable, policy: RadiationPolicy) -> Self {
        Self {
            bodies: Vec::new(),
            visibility,
            policy,
        }
    }

    /// Register a body and return its handle
    pub fn add_body(
        &mut self,
        name: impl Into<String>,
        radius: Meters,
        position: Vector3<f64>,
        state: BodyState,
    ) -> BodyId {
        let id = BodyId(self.bodies.len());
        let body = CelestialBody::new(id, name.into(), radius, position, state);
        info!(?id, name = %body.name, kind = ?body.kind(), "body registered");
        self.bodies.push(body);
        id
    }

    /// Radiation division policy
    #[must_use]
    pub fn policy(&self) -> RadiationPolicy {
        self.policy
    }

    /// Number of registered bodies
    #[must_use]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Body by handle
    ///
    /// # Errors
    /// `UnknownBody` for unregistered handles.
    pub fn body(&self, id: BodyId) -> Result<&CelestialBody> {
        self.bodies.get(id.0).ok_or(SimError::UnknownBody(id))
    }

    /// Mutable body by handle
    ///
    /// # Errors
    /// `UnknownBody` for unregistered handles.
    pub fn body_mut(&mut self, id: BodyId) -> Result<&mut CelestialBody> {
        self.bodies.get_mut(id.0).ok_or(SimError::UnknownBody(id))
    }

    /// Iterate all bodies in registration order
    pub fn bodies(&self) -> impl Iterator<Item = &CelestialBody> {
        self.bodies.iter()
    }

    /// Classify the sightline between two bodies and cache the result
    /// symmetrically. Idempotent: a repeat call returns the cached
    /// answer without touching the caches.
    ///
    /// # Errors
    /// `SelfDiscovery` for `a == b`; `UnknownBody` for bad handles;
    /// `InconsistentVisibility` if a pair is cached in both sets.
    pub fn discover(&mut self, a: BodyId, b: BodyId) -> Result<bool> {
        if a == b {
            return Err(SimError::SelfDiscovery(a));
        }
        if let Some(cached) = self.cached_visibility(a, b)? {
            return Ok(cached);
        }

        let kind_a = self.body(a)?.kind();
        let kind_b = self.body(b)?.kind();
        let visible = self.visibility.visible(kind_a, kind_b);
        debug!(?a, ?b, visible, "sightline classified");

        let body_a = &mut self.bodies[a.0];
        if visible {
            body_a.in_sight.insert(b);
        } else {
            body_a.out_of_sight.insert(b);
        }
        let body_b = &mut self.bodies[b.0];
        if visible {
            body_b.in_sight.insert(a);
        } else {
            body_b.out_of_sight.insert(a);
        }
        Ok(visible)
    }

    /// Whether `a` can see `b`, discovering the pair if it has not been
    /// classified yet. The cache check precedes discovery, so repeated
    /// queries terminate immediately.
    ///
    /// # Errors
    /// Same conditions as [`Universe::discover`].
    pub fn sees(&mut self, a: BodyId, b: BodyId) -> Result<bool> {
        if let Some(cached) = self.cached_visibility(a, b)? {
            return Ok(cached);
        }
        self.discover(a, b)
    }

    fn cached_visibility(&self, a: BodyId, b: BodyId) -> Result<Option<bool>> {
        let body_a = self.body(a)?;
        self.body(b)?;
        let seen = body_a.in_sight.contains(&b);
        let unseen = body_a.out_of_sight.contains(&b);
        match (seen, unseen) {
            (true, true) => Err(SimError::InconsistentVisibility(a, b)),
            (true, false) => Ok(Some(true)),
            (false, true) => Ok(Some(false)),
            (false, false) => Ok(None),
        }
    }

    /// Classify every pair of distinct bodies. O(n²).
    ///
    /// # Errors
    /// Propagates [`Universe::discover`] failures.
    pub fn discover_everything(&mut self) -> Result<()> {
        let n = self.bodies.len();
        for a in 0..n {
            for b in (a + 1)..n {
                self.discover(BodyId(a), BodyId(b))?;
            }
        }
        Ok(())
    }

    /// Euclidean distance between body centers
    ///
    /// # Errors
    /// `UnknownBody` for bad handles.
    pub fn distance_between(&self, a: BodyId, b: BodyId) -> Result<Meters> {
        let pa = self.body(a)?.position;
        let pb = self.body(b)?.position;
        Ok(Meters::new((pa - pb).norm()))
    }

    /// Solid angle subtended by `of` as seen from `from`: `π r² / d²`
    /// steradians (small-angle disc approximation).
    ///
    /// # Errors
    /// `UnknownBody` for bad handles.
    pub fn solid_angle(&self, from: BodyId, of: BodyId) -> Result<f64> {
        let r = *self.body(of)?.radius;
        let d = *self.distance_between(from, of)?;
        Ok(PI * r * r / (d * d))
    }

    /// Route `amount` of emitted energy to every body in the source's
    /// line of sight, weighted by solid angle over the full sphere.
    ///
    /// # Errors
    /// `UnknownBody` for a bad source handle.
    pub fn radiate_inside(&mut self, source: BodyId, amount: Joules) -> Result<()> {
        let receivers: Vec<BodyId> = self.body(source)?.in_sight.iter().copied().collect();
        if receivers.is_empty() {
            return Ok(());
        }

        let mut fractions = Vec::with_capacity(receivers.len());
        for &id in &receivers {
            fractions.push(self.solid_angle(source, id)? / (4.0 * PI));
        }
        if self.policy == RadiationPolicy::Renormalize {
            let sum: f64 = fractions.iter().sum();
            if sum > 0.0 {
                for f in &mut fractions {
                    *f /= sum;
                }
            }
        }

        for (&id, fraction) in receivers.iter().zip(&fractions) {
            let share = amount * *fraction;
            self.bodies[id.0].receive_radiation(share);
        }
        Ok(())
    }

    /// One universe step: stars radiate into their sightlines, then
    /// every planet surface runs its diffusion tick. Sequential and
    /// deterministic.
    ///
    /// # Errors
    /// Propagates routing failures.
    pub fn tick(&mut self, dt: Seconds) -> Result<()> {
        let emissions: Vec<(BodyId, Joules)> = self
            .bodies
            .iter_mut()
            .filter_map(|body| match &mut body.state {
                BodyState::Star(sun) => Some((body.id, sun.radiate(dt))),
                BodyState::Planet(_) => None,
            })
            .collect();
        for (source, amount) in emissions {
            self.radiate_inside(source, amount)?;
        }

        for body in &mut self.bodies {
            if let BodyState::Planet(surface) = &mut body.state {
                surface.grid_mut().tick(dt);
            }
        }
        Ok(())
    }
}

impl Default for Universe {
    fn default() -> Self {
        Self::new(VisibilityTable::default(), RadiationPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::celestial::body::{PlanetSurface, Sun};
    use crate::core_types::Watts;
    use crate::grid::{CellInit, ComponentAggregation, GridShape};
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn two_body_universe() -> (Universe, BodyId, BodyId) {
        let mut universe = Universe::default();
        let sun = universe.add_body(
            "sun",
            Meters::new(6.957e8),
            Vector3::zeros(),
            BodyState::Star(Sun::default()),
        );
        let grid =
            ComponentAggregation::uniform(GridShape::new(2, 2, 1), &CellInit::default()).unwrap();
        let earth = universe.add_body(
            "earth",
            Meters::new(6.371e6),
            Vector3::new(1.496e11, 0.0, 0.0),
            BodyState::Planet(PlanetSurface::new(grid)),
        );
        (universe, sun, earth)
    }

    #[test]
    fn star_sees_planet_but_not_star() {
        let (mut universe, sun, earth) = two_body_universe();
        assert!(universe.sees(sun, earth).unwrap());
        assert!(universe.sees(earth, sun).unwrap());

        let other_star = universe.add_body(
            "companion",
            Meters::new(6.0e8),
            Vector3::new(0.0, 3.0e11, 0.0),
            BodyState::Star(Sun::default()),
        );
        assert!(!universe.sees(sun, other_star).unwrap());
    }

    #[test]
    fn discovery_is_idempotent_and_symmetric() {
        let (mut universe, sun, earth) = two_body_universe();
        let first = universe.discover(sun, earth).unwrap();
        let second = universe.discover(sun, earth).unwrap();
        assert_eq!(first, second);
        assert_eq!(universe.body(sun).unwrap().in_sight.len(), 1);
        assert_eq!(universe.body(earth).unwrap().in_sight.len(), 1);
        assert!(universe.body(earth).unwrap().in_sight.contains(&sun));
    }

    #[test]
    fn self_discovery_is_an_error() {
        let (mut universe, sun, _) = two_body_universe();
        assert!(matches!(
            universe.discover(sun, sun),
            Err(SimError::SelfDiscovery(_))
        ));
    }

    #[test]
    fn discover_everything_classifies_all_pairs() {
        let (mut universe, _, _) = two_body_universe();
        universe.add_body(
            "mars",
            Meters::new(3.39e6),
            Vector3::new(2.28e11, 0.0, 0.0),
            BodyState::Planet(PlanetSurface::new(
                ComponentAggregation::uniform(GridShape::new(1, 1, 1), &CellInit::default())
                    .unwrap(),
            )),
        );
        universe.discover_everything().unwrap();
        for body in universe.bodies() {
            let classified = body.in_sight.len() + body.out_of_sight.len();
            assert_eq!(classified, universe.len() - 1, "body {}", body.name);
        }
    }

    #[test]
    fn solid_angle_matches_disc_formula() {
        let (universe, sun, earth) = two_body_universe();
        let sa = universe.solid_angle(sun, earth).unwrap();
        let expected = PI * 6.371e6 * 6.371e6 / (1.496e11 * 1.496e11);
        assert_relative_eq!(sa, expected, max_relative = 1e-12);
    }

    #[test]
    fn radiation_delivers_solid_angle_fraction() {
        let (mut universe, sun, earth) = two_body_universe();
        universe.discover_everything().unwrap();
        let before = match &universe.body(earth).unwrap().state {
            BodyState::Planet(p) => *p.grid().total_energy(),
            BodyState::Star(_) => unreachable!(),
        };

        let amount = Joules::new(1.0e20);
        universe.radiate_inside(sun, amount).unwrap();

        let fraction = universe.solid_angle(sun, earth).unwrap() / (4.0 * PI);
        let after = match &universe.body(earth).unwrap().state {
            BodyState::Planet(p) => *p.grid().total_energy(),
            BodyState::Star(_) => unreachable!(),
        };
        assert_relative_eq!(after - before, 1.0e20 * fraction, max_relative = 1e-6);
    }

    #[test]
    fn renormalized_radiation_delivers_everything() {
        let mut universe = Universe::new(VisibilityTable::default(), RadiationPolicy::Renormalize);
        let sun = universe.add_body(
            "sun",
            Meters::new(6.957e8),
            Vector3::zeros(),
            BodyState::Star(Sun::new(Watts::new(1.0e3), None)),
        );
        let grid =
            ComponentAggregation::uniform(GridShape::new(1, 1, 1), &CellInit::default()).unwrap();
        let earth = universe.add_body(
            "earth",
            Meters::new(6.371e6),
            Vector3::new(1.496e11, 0.0, 0.0),
            BodyState::Planet(PlanetSurface::new(grid)),
        );
        universe.discover_everything().unwrap();

        let before = match &universe.body(earth).unwrap().state {
            BodyState::Planet(p) => *p.grid().total_energy(),
            BodyState::Star(_) => unreachable!(),
        };
        universe.radiate_inside(sun, Joules::new(500.0)).unwrap();
        let after = match &universe.body(earth).unwrap().state {
            BodyState::Planet(p) => *p.grid().total_energy(),
            BodyState::Star(_) => unreachable!(),
        };
        // Sole receiver absorbs the full emission
        assert_relative_eq!(after - before, 500.0, max_relative = 1e-9);
    }

    #[test]
    fn unknown_body_is_an_error() {
        let (universe, _, _) = two_body_universe();
        assert!(matches!(
            universe.body(BodyId(99)),
            Err(SimError::UnknownBody(BodyId(99)))
        ));
    }
}
