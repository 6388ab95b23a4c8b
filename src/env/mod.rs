mod report;
mod space;

pub use report::Report;
pub use space::BoxSpace;

/// The outcome of a single environment step
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<S> {
    /// The state after the step, reported even when the episode has ended
    pub state: S,
    pub reward: f32,
    /// Whether the step ended the episode
    pub done: bool,
}

/// Represents a Markov decision process, defining the dynamics of an environment
/// in which an agent can operate.
///
/// This base trait represents the common case of a discrete-time MDP with one agent.
pub trait Environment {
    /// A representation of the state of the environment to be passed to an agent
    type State;

    /// A representation of an action that an agent can take to affect the environment
    type Action;

    /// Determine if the state is active or terminal
    fn is_active(&self) -> bool;

    /// Sample an action uniformly from the action space
    ///
    /// Takes `&mut self` so the draw can come from the environment's own seeded generator
    fn random_action(&mut self) -> Self::Action;

    /// Update the environment in response to an action taken by an agent, producing a new state,
    /// an associated reward and a termination flag
    fn step(&mut self, action: Self::Action) -> Transition<Self::State>;

    /// Reset the environment to an initial state
    ///
    /// **Returns** the state
    fn reset(&mut self) -> Self::State;
}

/// An environment whose randomness can be reseeded for reproducible episodes
pub trait Seedable: Environment {
    /// Reinitialize the random generator from `seed`, or from entropy when `None`
    ///
    /// **Returns** the seed actually used
    fn seed(&mut self, seed: Option<u64>) -> u64;
}

/// An environment with continuous observation and action spaces
///
/// ### Generics
/// - `O` - Dimension of the observation vector
/// - `A` - Dimension of the action vector
pub trait BoxSpaces<const O: usize, const A: usize>: Environment {
    fn observation_space(&self) -> &BoxSpace<O>;
    fn action_space(&self) -> &BoxSpace<A>;
}
