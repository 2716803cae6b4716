// JumpWatch — Jump Loop Task
//
// Single cooperative polling loop. The clock is read once per iteration and
// handed to both the jump detector and the environment interval check. A goal
// vibration blocks this loop for its full duration, so no jumps are counted
// while the motor runs.

use std::thread;
use std::time::Duration;

use jumpwatch::app::JumpWatch;
use jumpwatch::config::*;
use jumpwatch::hal::{AccelSource, Actuator, EnvSource, PresentationAdapter};

pub fn jump_loop<A, E, P, V>(mut watch: JumpWatch<A, E, P, V>) -> !
where
    A: AccelSource,
    E: EnvSource,
    P: PresentationAdapter,
    V: Actuator,
{
    log::info!("Jump loop started");

    let poll_interval = Duration::from_millis(LOOP_POLL_MS);

    loop {
        let now = crate::now_ms();
        watch.poll(now);

        // Let the idle task run so the task watchdog stays fed.
        thread::sleep(poll_interval);
    }
}
