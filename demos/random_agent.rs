use std::{error::Error, thread, time::Duration};

use object_transition::{
    env::{Environment, Seedable},
    gym::{ForceModel, ObjectTransition, ObjectTransitionConfig},
    viz,
};

const NUM_EPISODES: u16 = 100;
const MAX_STEPS: usize = 300;

/// Drive the environment with uniformly random forces
///
/// Usage: `random_agent [legacy|corrected] [seed]`
fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let force_model = args
        .next()
        .map(|s| s.parse::<ForceModel>())
        .transpose()?
        .unwrap_or(ForceModel::Corrected);
    let seed = args.next().map(|s| s.parse::<u64>()).transpose()?;

    let mut env = ObjectTransition::new(ObjectTransitionConfig {
        force_model,
        ..Default::default()
    })?;

    let (handle, tx) = viz::init(env.report.keys(), NUM_EPISODES);
    let seed = env.seed(seed);
    log::info!("running {NUM_EPISODES} episodes with the {force_model} force model, seed {seed}");

    'episodes: for episode in 0..NUM_EPISODES {
        env.reset();
        for _ in 0..MAX_STEPS {
            let action = env.random_action();
            let transition = env.step(action);
            if tx.send(viz::Update::Frame(env.scene())).is_err() {
                break 'episodes;
            }
            thread::sleep(Duration::from_millis(2));
            if transition.done {
                break;
            }
        }

        let report = env.report.take();
        let update = viz::Update::Episode {
            episode,
            data: report.values().copied().collect(),
        };
        if tx.send(update).is_err() {
            break;
        }
    }

    drop(tx);
    let _ = handle.join();
    Ok(())
}
