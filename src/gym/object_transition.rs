use log::{debug, info, trace};
use rand::rngs::StdRng;
use strum::{Display, EnumIter, EnumString, VariantArray};

use crate::{
    env::{BoxSpace, BoxSpaces, Environment, Report, Seedable, Transition},
    error::EnvError,
    geom::{Position, Rect},
    seeding::RandomSource,
};

/// How the applied forces are turned into a velocity
#[derive(Display, EnumString, EnumIter, VariantArray, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum ForceModel {
    /// The historical dynamics of this environment: the force magnitude is computed from `fx`
    /// alone (`sqrt(fx² + fx²)`) and the friction rescale is applied to a velocity that starts
    /// at zero, so the object never moves
    #[default]
    Legacy,
    /// Velocity is the net force `(fx, fy)` shrunk by the friction threshold along its direction
    Corrected,
}

impl ForceModel {
    /// Magnitude of the net force as seen by the friction test
    pub fn magnitude(self, fx: f64, fy: f64) -> f64 {
        match self {
            Self::Legacy => (fx.powi(2) + fx.powi(2)).sqrt(),
            Self::Corrected => fx.hypot(fy),
        }
    }

    /// Velocity resulting from the net force `(fx, fy)` against `friction`
    ///
    /// `Legacy` rescales a zero velocity, which stays zero for every input, including forces
    /// whose magnitude overflows. `Corrected` ignores a net force that is not finite.
    pub fn velocity(self, fx: f64, fy: f64, friction: f64) -> (f64, f64) {
        match self {
            Self::Legacy => (0.0, 0.0),
            Self::Corrected => {
                let f_sig = self.magnitude(fx, fy);
                if !f_sig.is_finite() || f_sig <= friction {
                    return (0.0, 0.0);
                }
                let scale = (f_sig - friction) / f_sig;
                (fx * scale, fy * scale)
            }
        }
    }
}

/// Configuration for the [`ObjectTransition`] environment
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectTransitionConfig {
    /// World bounds, every position is clamped into this rectangle after a step
    pub region: Rect,
    /// Entering any of these ends the episode with a penalty
    pub obstacles: Vec<Rect>,
    /// Entering this ends the episode with a reward
    pub goal: Rect,
    /// Net force magnitude below which the object does not move
    pub friction: f64,
    /// Lower bound of every action component in the declared action space
    pub min_force: f64,
    /// Upper bound of every action component in the declared action space
    pub max_force: f64,
    /// Half-open interval the initial x coordinate is drawn from
    pub start_x: (f64, f64),
    /// Half-open interval the initial y coordinate is drawn from
    pub start_y: (f64, f64),
    /// Dynamics applied to the net force, [`ForceModel::Legacy`] by default
    pub force_model: ForceModel,
}

impl Default for ObjectTransitionConfig {
    fn default() -> Self {
        Self {
            region: Rect::new(0.0, 80.0, 0.0, 40.0),
            obstacles: vec![Rect::new(40.0, 50.0, 15.0, 25.0)],
            goal: Rect::new(64.0, 70.0, 17.0, 23.0),
            friction: 1.0,
            min_force: -2.0,
            max_force: 2.0,
            start_x: (0.0, 20.0),
            start_y: (0.0, 40.0),
            force_model: ForceModel::Legacy,
        }
    }
}

impl ObjectTransitionConfig {
    /// Check the configuration before an environment is built from it
    ///
    /// Rectangles, force bounds and start ranges must be finite and not inverted,
    /// friction must be positive, and start ranges must lie inside the region.
    pub fn validate(&self) -> Result<(), EnvError> {
        let rects = std::iter::once(("region", &self.region))
            .chain(std::iter::once(("goal", &self.goal)))
            .chain(self.obstacles.iter().map(|o| ("obstacle", o)));
        for (name, rect) in rects {
            if !rect.is_finite() {
                return Err(EnvError::NonFiniteRect { name, rect: *rect });
            }
            if !rect.is_well_formed() {
                return Err(EnvError::EmptyRect { name, rect: *rect });
            }
        }

        if !(self.friction > 0.0) {
            return Err(EnvError::NonPositiveFriction(self.friction));
        }

        if !(self.min_force <= self.max_force)
            || !self.min_force.is_finite()
            || !self.max_force.is_finite()
        {
            return Err(EnvError::InvalidForceBounds {
                min: self.min_force,
                max: self.max_force,
            });
        }

        let axes = [
            ("x", self.start_x, self.region.xmin, self.region.xmax),
            ("y", self.start_y, self.region.ymin, self.region.ymax),
        ];
        for (axis, (low, high), min, max) in axes {
            if !(low <= high) || !low.is_finite() || !high.is_finite() {
                return Err(EnvError::InvalidStartRange { axis, low, high });
            }
            if low < min || high > max {
                return Err(EnvError::StartOutsideRegion { axis, low, high });
            }
        }

        Ok(())
    }
}

/// An object pushed around a walled 2-D field by four force components
///
/// The action is `[a0, a1, a2, a3]` forming the net force `fx = a0 + a2`, `fy = a1 + a3`.
/// The episode ends when the object is inside the goal (`+1`) or an obstacle (`-1`).
/// Under the default [`ForceModel::Legacy`] the object is immobile, so an episode only
/// terminates if it starts inside one of those zones.
///
/// ### Generics
/// - `R` - The [`RandomSource`] used for initial positions and random actions, [`StdRng`] by default
///
/// Initial positions and random actions come from two generators derived from the same seed,
/// so sampling actions never shifts the sequence of initial positions.
#[derive(Debug, Clone)]
pub struct ObjectTransition<R: RandomSource = StdRng> {
    region: Rect,
    obstacles: Vec<Rect>,
    goal: Rect,
    friction: f64,
    force_model: ForceModel,
    start_x: (f64, f64),
    start_y: (f64, f64),
    observation_space: BoxSpace<2>,
    action_space: BoxSpace<4>,
    state: Position,
    done: bool,
    rng: R,
    action_rng: R,
    seed: u64,
    pub report: Report,
}

/// Mixed into the seed to derive the random action stream
const ACTION_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

impl ObjectTransition {
    /// Initialize the environment with an entropy-seeded [`StdRng`] and reset it
    pub fn new(config: ObjectTransitionConfig) -> Result<Self, EnvError> {
        Self::with_source(config)
    }
}

impl<R: RandomSource> ObjectTransition<R> {
    /// Initialize the environment with a custom [`RandomSource`], seeded from entropy, and reset it
    pub fn with_source(config: ObjectTransitionConfig) -> Result<Self, EnvError> {
        config.validate()?;
        let ObjectTransitionConfig {
            region,
            obstacles,
            goal,
            friction,
            min_force,
            max_force,
            start_x,
            start_y,
            force_model,
        } = config;

        let observation_space = BoxSpace::new([region.xmin, region.ymin], [region.xmax, region.ymax])
            .ok_or(EnvError::EmptyRect {
                name: "region",
                rect: region,
            })?;
        let action_space =
            BoxSpace::uniform(min_force, max_force).ok_or(EnvError::InvalidForceBounds {
                min: min_force,
                max: max_force,
            })?;

        let (rng, seed) = R::seeded(None);
        let (action_rng, _) = R::seeded(Some(seed ^ ACTION_STREAM));
        let mut env = Self {
            region,
            obstacles,
            goal,
            friction,
            force_model,
            start_x,
            start_y,
            observation_space,
            action_space,
            state: Position::default(),
            done: false,
            rng,
            action_rng,
            seed,
            report: Report::new(vec!["reward", "steps"]),
        };
        env.reset();
        Ok(env)
    }

    pub fn position(&self) -> Position {
        self.state
    }

    /// Place the object at `pos` and mark the episode as running
    ///
    /// The position is taken as-is; it is only clamped by the next step.
    pub fn set_position(&mut self, pos: Position) {
        self.state = pos;
        self.done = false;
    }

    pub fn region(&self) -> &Rect {
        &self.region
    }

    pub fn goal(&self) -> &Rect {
        &self.goal
    }

    pub fn obstacles(&self) -> &[Rect] {
        &self.obstacles
    }

    pub fn friction(&self) -> f64 {
        self.friction
    }

    pub fn force_model(&self) -> ForceModel {
        self.force_model
    }

    /// The seed most recently used to initialize the random source
    pub fn last_seed(&self) -> u64 {
        self.seed
    }

    /// Compute the transition from `from` under `action` without touching the environment
    pub fn evaluate(&self, from: Position, action: [f64; 4]) -> Transition<Position> {
        let fx = action[0] + action[2];
        let fy = action[1] + action[3];
        let (vx, vy) = self.force_model.velocity(fx, fy, self.friction);

        let moved = Position::new(from.x + vx, from.y + vy);

        // Zone membership is decided before clamping
        let in_goal = self.goal.contains(&moved);
        let in_obstacle = self.obstacles.iter().any(|o| o.contains(&moved));

        let state = self.region.clamp(moved);

        let mut reward = 0.0;
        if in_goal {
            reward += 1.0;
        }
        if in_obstacle {
            reward -= 1.0;
        }

        Transition {
            state,
            reward,
            done: in_goal || in_obstacle,
        }
    }
}

impl<R: RandomSource> Environment for ObjectTransition<R> {
    type State = Position;
    type Action = [f64; 4];

    fn is_active(&self) -> bool {
        !self.done
    }

    fn random_action(&mut self) -> Self::Action {
        self.action_space.sample_with(&mut self.action_rng)
    }

    fn step(&mut self, action: Self::Action) -> Transition<Self::State> {
        if self.done {
            debug!("stepping a finished episode from {}", self.state);
        }

        let transition = self.evaluate(self.state, action);
        trace!(
            "{} --{:?}--> {} reward={} done={}",
            self.state,
            action,
            transition.state,
            transition.reward,
            transition.done
        );

        self.state = transition.state;
        self.done = transition.done;

        self.report.entry("steps").and_modify(|x| *x += 1.0);
        self.report
            .entry("reward")
            .and_modify(|x| *x += transition.reward as f64);

        if transition.done {
            info!(
                "episode finished at {} with reward {}",
                transition.state, transition.reward
            );
        }

        transition
    }

    fn reset(&mut self) -> Self::State {
        let x = self.rng.uniform(self.start_x.0, self.start_x.1);
        let y = self.rng.uniform(self.start_y.0, self.start_y.1);
        self.state = Position::new(x, y);
        self.done = false;
        debug!("reset to {}", self.state);
        self.state
    }
}

impl<R: RandomSource> Seedable for ObjectTransition<R> {
    fn seed(&mut self, seed: Option<u64>) -> u64 {
        let (rng, seed) = R::seeded(seed);
        let (action_rng, _) = R::seeded(Some(seed ^ ACTION_STREAM));
        self.rng = rng;
        self.action_rng = action_rng;
        self.seed = seed;
        debug!("seeded with {seed}");
        seed
    }
}

impl<R: RandomSource> BoxSpaces<2, 4> for ObjectTransition<R> {
    fn observation_space(&self) -> &BoxSpace<2> {
        &self.observation_space
    }

    fn action_space(&self) -> &BoxSpace<4> {
        &self.action_space
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use proptest::prelude::*;
    use statrs::statistics::Statistics;

    use super::*;

    fn env() -> ObjectTransition {
        ObjectTransition::new(ObjectTransitionConfig::default()).unwrap()
    }

    fn corrected() -> ObjectTransition {
        ObjectTransition::new(ObjectTransitionConfig {
            force_model: ForceModel::Corrected,
            ..Default::default()
        })
        .unwrap()
    }

    /// Replays a fixed list of draws, ignoring the requested interval
    struct Scripted(VecDeque<f64>);

    impl RandomSource for Scripted {
        fn seeded(seed: Option<u64>) -> (Self, u64) {
            (Scripted(VecDeque::from([5.0, 10.0, 64.0, 17.0])), seed.unwrap_or(0))
        }

        fn uniform(&mut self, low: f64, _high: f64) -> f64 {
            self.0.pop_front().unwrap_or(low)
        }
    }

    #[test]
    fn seeded_episode_start() {
        let mut env = env();
        assert_eq!(env.seed(Some(42)), 42, "Seed is echoed back");
        let start = env.reset();
        assert!((0.0..=20.0).contains(&start.x), "x in start range");
        assert!((0.0..=40.0).contains(&start.y), "y in start range");

        let Transition {
            state,
            reward,
            done,
        } = env.step([0.0; 4]);
        assert_eq!(state, start, "Object does not move");
        assert_eq!(reward, 0.0);
        assert!(!done, "Start range is clear of goal and obstacle");
        assert!(env.is_active());
    }

    #[test]
    fn obstacle_ends_episode() {
        let mut env = env();
        env.set_position(Position::new(45.0, 20.0));
        let t = env.step([2.0, -1.5, 0.3, 2.0]);
        assert!(t.done, "Obstacle is terminal");
        assert_eq!(t.reward, -1.0, "Obstacle is penalized");
        assert_eq!(t.state, Position::new(45.0, 20.0), "Position unchanged");
        assert!(!env.is_active());
    }

    #[test]
    fn goal_boundary_is_inclusive() {
        let mut env = env();
        env.set_position(Position::new(64.0, 17.0));
        let t = env.step([0.0; 4]);
        assert!(t.done);
        assert_eq!(t.reward, 1.0, "Goal is rewarded");
    }

    #[test]
    fn overlapping_goal_and_obstacle_cancel() {
        let mut env = ObjectTransition::new(ObjectTransitionConfig {
            goal: Rect::new(45.0, 55.0, 20.0, 30.0),
            ..Default::default()
        })
        .unwrap();
        env.set_position(Position::new(48.0, 22.0));
        let t = env.step([1.0, 1.0, 1.0, 1.0]);
        assert!(t.done);
        assert_eq!(t.reward, 0.0, "Goal and obstacle cancel out");
    }

    #[test]
    fn stepping_after_done_keeps_computing() {
        let mut env = env();
        env.set_position(Position::new(66.0, 20.0));
        assert!(env.step([0.0; 4]).done);
        let again = env.step([0.0; 4]);
        assert!(again.done, "Still in goal");
        assert_eq!(again.reward, 1.0);
        assert_eq!(env.report.get("steps"), Some(2.0));
        assert_eq!(env.report.get("reward"), Some(2.0));
    }

    #[test]
    fn legacy_magnitude_uses_fx_twice() {
        let model = ForceModel::Legacy;
        assert_eq!(model.magnitude(0.0, 4.0), 0.0, "fy is ignored");
        assert_eq!(model.magnitude(3.0, 4.0), 18.0f64.sqrt());
        assert_eq!(model.velocity(4.0, 4.0, 1.0), (0.0, 0.0), "Velocity stays zero");
        assert_eq!(ForceModel::Corrected.magnitude(3.0, 4.0), 5.0);
    }

    #[test]
    fn corrected_model_moves_and_clamps() {
        let mut env = corrected();
        env.set_position(Position::new(10.0, 20.0));

        let t = env.step([2.0, 0.0, 0.0, 0.0]);
        assert_eq!(t.state, Position::new(11.0, 20.0), "Half the force survives friction");

        let t = env.step([0.3, 0.0, 0.3, 0.0]);
        assert_eq!(t.state, Position::new(11.0, 20.0), "Below friction nothing moves");

        env.set_position(Position::new(79.5, 20.0));
        let t = env.step([2.0, 0.0, 2.0, 0.0]);
        assert_eq!(t.state, Position::new(80.0, 20.0), "Clamped to the right wall");
        assert!(!t.done);
    }

    #[test]
    fn containment_uses_unclamped_position() {
        let mut env = ObjectTransition::new(ObjectTransitionConfig {
            goal: Rect::new(81.0, 90.0, 0.0, 40.0),
            force_model: ForceModel::Corrected,
            ..Default::default()
        })
        .unwrap();
        env.set_position(Position::new(79.0, 20.0));
        let t = env.step([2.0, 0.0, 2.0, 0.0]);
        assert!(t.done, "Goal beyond the wall is reached before clamping");
        assert_eq!(t.state, Position::new(80.0, 20.0));
    }

    #[test]
    fn reset_is_reproducible() {
        let mut a = env();
        let mut b = env();
        a.seed(Some(7));
        b.seed(Some(7));
        for _ in 0..10 {
            assert_eq!(a.reset(), b.reset());
        }

        let seed = a.seed(None);
        let first = a.reset();
        b.seed(Some(seed));
        assert_eq!(b.reset(), first, "Entropy seed can be replayed");
        assert_eq!(a.last_seed(), seed);
    }

    #[test]
    fn reset_distribution() {
        let mut env = env();
        env.seed(Some(1234));
        let (xs, ys): (Vec<f64>, Vec<f64>) = (0..4000)
            .map(|_| env.reset())
            .map(|p| (p.x, p.y))
            .unzip();

        assert!(xs.iter().all(|x| (0.0..=20.0).contains(x)));
        assert!(ys.iter().all(|y| (0.0..=40.0).contains(y)));
        assert!((xs.iter().mean() - 10.0).abs() < 0.5, "x is centered");
        assert!((ys.iter().mean() - 20.0).abs() < 1.0, "y is centered");
    }

    #[test]
    fn injected_source() {
        let mut env = ObjectTransition::<Scripted>::with_source(Default::default()).unwrap();
        assert_eq!(env.position(), Position::new(5.0, 10.0), "Constructor resets");

        let start = env.reset();
        assert_eq!(start, Position::new(64.0, 17.0));
        assert!(env.step([0.0; 4]).done, "Scripted start lies on the goal corner");

        assert_eq!(env.seed(Some(3)), 3);
        assert_eq!(env.reset(), Position::new(5.0, 10.0));
    }

    #[test]
    fn spaces() {
        let mut env = env();
        assert_eq!(env.observation_space().low(), &[0.0, 0.0]);
        assert_eq!(env.observation_space().high(), &[80.0, 40.0]);
        assert_eq!(env.action_space().low(), &[-2.0; 4]);
        assert_eq!(env.action_space().high(), &[2.0; 4]);
        for _ in 0..100 {
            let action = env.random_action();
            assert!(env.action_space().contains(&action));
        }
    }

    #[test]
    fn random_actions_follow_the_seed() {
        let mut a = env();
        let mut b = env();
        a.seed(Some(11));
        b.seed(Some(11));
        for _ in 0..20 {
            assert_eq!(a.random_action(), b.random_action());
        }

        a.seed(Some(11));
        b.seed(Some(11));
        let _ = a.random_action();
        assert_eq!(a.reset(), b.reset(), "Actions do not consume the reset stream");
    }

    #[test]
    fn overflowing_forces_leave_legacy_object_still() {
        let mut env = env();
        let start = Position::new(10.0, 20.0);
        for action in [
            [1e200, 0.0, 0.0, 0.0],
            [f64::MAX, 0.0, f64::MAX, 0.0],
            [f64::INFINITY, 0.0, 0.0, 0.0],
            [f64::NEG_INFINITY, f64::INFINITY, 0.0, 0.0],
            [f64::NAN, 0.0, 0.0, f64::NAN],
        ] {
            env.set_position(start);
            let t = env.step(action);
            assert_eq!(t.state, start, "{action:?} moved the object");
            assert_eq!(t.reward, 0.0);
            assert!(!t.done);
        }
    }

    #[test]
    fn non_finite_force_is_ignored_by_corrected_model() {
        let mut env = corrected();
        env.set_position(Position::new(10.0, 20.0));
        let t = env.step([f64::INFINITY, 0.0, 0.0, 0.0]);
        assert_eq!(t.state, Position::new(10.0, 20.0));

        let t = env.step([1e300, 0.0, 0.0, 0.0]);
        assert_eq!(t.state, Position::new(80.0, 20.0), "Huge finite force hits the wall");
    }

    #[test]
    fn wide_start_range_samples_without_panicking() {
        let mut env = ObjectTransition::new(ObjectTransitionConfig {
            region: Rect::new(-1e308, 1e308, 0.0, 40.0),
            start_x: (-1e308, 1e308),
            ..Default::default()
        })
        .unwrap();
        for _ in 0..100 {
            let start = env.reset();
            assert!(start.x.is_finite() && (-1e308..=1e308).contains(&start.x));
        }
    }

    #[test]
    fn config_validation() {
        let bad_region = ObjectTransitionConfig {
            region: Rect::new(80.0, 0.0, 0.0, 40.0),
            ..Default::default()
        };
        assert!(matches!(
            bad_region.validate(),
            Err(EnvError::EmptyRect { name: "region", .. })
        ));

        let bad_obstacle = ObjectTransitionConfig {
            obstacles: vec![Rect::new(0.0, 1.0, 5.0, 2.0)],
            ..Default::default()
        };
        assert!(matches!(
            bad_obstacle.validate(),
            Err(EnvError::EmptyRect { name: "obstacle", .. })
        ));

        let no_friction = ObjectTransitionConfig {
            friction: 0.0,
            ..Default::default()
        };
        assert_eq!(no_friction.validate(), Err(EnvError::NonPositiveFriction(0.0)));

        let forces = ObjectTransitionConfig {
            min_force: 2.0,
            max_force: -2.0,
            ..Default::default()
        };
        assert!(ObjectTransition::new(forces).is_err());

        let start = ObjectTransitionConfig {
            start_y: (10.0, 50.0),
            ..Default::default()
        };
        assert_eq!(
            start.validate(),
            Err(EnvError::StartOutsideRegion {
                axis: "y",
                low: 10.0,
                high: 50.0
            })
        );

        let inverted = ObjectTransitionConfig {
            start_x: (20.0, 0.0),
            ..Default::default()
        };
        assert!(matches!(
            inverted.validate(),
            Err(EnvError::InvalidStartRange { axis: "x", .. })
        ));

        let unbounded_start = ObjectTransitionConfig {
            start_x: (f64::NEG_INFINITY, 10.0),
            ..Default::default()
        };
        assert!(matches!(
            unbounded_start.validate(),
            Err(EnvError::InvalidStartRange { axis: "x", .. })
        ));

        let nan_start = ObjectTransitionConfig {
            start_y: (f64::NAN, 10.0),
            ..Default::default()
        };
        assert!(matches!(
            nan_start.validate(),
            Err(EnvError::InvalidStartRange { axis: "y", .. })
        ));

        let infinite_region = ObjectTransitionConfig {
            region: Rect::new(0.0, f64::INFINITY, 0.0, 40.0),
            ..Default::default()
        };
        assert!(matches!(
            infinite_region.validate(),
            Err(EnvError::NonFiniteRect { name: "region", .. })
        ));

        let unbounded_forces = ObjectTransitionConfig {
            max_force: f64::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            unbounded_forces.validate(),
            Err(EnvError::InvalidForceBounds { .. })
        ));

        assert!(ObjectTransitionConfig::default().validate().is_ok());
    }

    #[test]
    fn force_model_names() {
        assert_eq!(ForceModel::Legacy.to_string(), "legacy");
        assert_eq!("corrected".parse::<ForceModel>(), Ok(ForceModel::Corrected));
    }

    proptest! {
        #[test]
        fn legacy_object_never_moves(
            x in 0.0f64..=80.0,
            y in 0.0f64..=40.0,
            action in prop::array::uniform4(prop::num::f64::ANY),
        ) {
            let mut env = env();
            env.set_position(Position::new(x, y));
            let t = env.step(action);
            prop_assert_eq!(t.state, Position::new(x, y));
        }

        #[test]
        fn position_stays_in_region(
            x in -50.0f64..150.0,
            y in -50.0f64..100.0,
            action in prop::array::uniform4(prop::num::f64::ANY),
            model in prop::sample::select(ForceModel::VARIANTS),
        ) {
            let mut env = ObjectTransition::new(ObjectTransitionConfig {
                force_model: model,
                ..Default::default()
            }).unwrap();
            env.set_position(Position::new(x, y));
            let t = env.step(action);
            prop_assert!(env.region().contains(&t.state));
            prop_assert!(env.observation_space().contains(&t.state.to_array()));
        }

        #[test]
        fn reward_matches_zones(
            x in 0.0f64..=80.0,
            y in 0.0f64..=40.0,
        ) {
            let mut env = env();
            let pos = Position::new(x, y);
            env.set_position(pos);
            let t = env.step([0.0; 4]);
            let in_goal = env.goal().contains(&pos);
            let in_obstacle = env.obstacles()[0].contains(&pos);
            let expected = match (in_goal, in_obstacle) {
                (true, false) => 1.0,
                (false, true) => -1.0,
                _ => 0.0,
            };
            prop_assert_eq!(t.reward, expected);
            prop_assert_eq!(t.done, in_goal || in_obstacle);
        }
    }
}
