// JumpWatch — Jump Detector
//
// One-axis, two-threshold edge detector on calibrated z:
//
//   Idle   --(z >  threshold)-->  Rising
//   Rising --(z < -threshold)-->  Idle   (jump confirmed, counter + 1)
//
// Every transition, including Idle -> Rising, is gated by the debounce
// window measured from the last confirmed jump. The window also covers the
// first `debounce_ms` after boot because the last jump time starts at 0.

use crate::config::*;
use crate::events::JumpEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JumpState {
    /// Waiting for the upward spike.
    #[default]
    Idle,
    /// Upward spike seen; waiting for the opposite spike.
    Rising,
}

#[derive(Debug, Clone)]
pub struct JumpDetector {
    threshold: f32,
    debounce_ms: u32,
    goal: u32,

    state: JumpState,
    count: u32,
    last_jump_ms: u32,
}

impl Default for JumpDetector {
    fn default() -> Self {
        Self::with_params(JUMP_THRESHOLD, DEBOUNCE_TIME_MS, JUMP_GOAL)
    }
}

impl JumpDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(threshold: f32, debounce_ms: u32, goal: u32) -> Self {
        Self {
            threshold,
            debounce_ms,
            goal,
            state: JumpState::Idle,
            count: 0,
            last_jump_ms: 0,
        }
    }

    pub fn state(&self) -> JumpState {
        self.state
    }

    /// Jumps confirmed since the last goal, always below the goal.
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn last_jump_ms(&self) -> u32 {
        self.last_jump_ms
    }

    pub fn goal(&self) -> u32 {
        self.goal
    }

    /// Feed one calibrated z sample taken at `now_ms` (ms since boot).
    pub fn on_sample(&mut self, calibrated_z: f32, now_ms: u32) -> Option<JumpEvent> {
        if now_ms.wrapping_sub(self.last_jump_ms) <= self.debounce_ms {
            return None;
        }

        match self.state {
            JumpState::Idle if calibrated_z > self.threshold => {
                log::debug!("Jump rising edge (z = {:.2})", calibrated_z);
                self.state = JumpState::Rising;
                None
            }
            JumpState::Rising if calibrated_z < -self.threshold => {
                self.state = JumpState::Idle;
                self.last_jump_ms = now_ms;
                self.count += 1;

                if self.count >= self.goal {
                    self.count = 0;
                    Some(JumpEvent::GoalReached)
                } else {
                    Some(JumpEvent::JumpCompleted { count: self.count })
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HIGH: f32 = JUMP_THRESHOLD + 0.5;
    const LOW: f32 = -JUMP_THRESHOLD - 0.5;

    /// Drive one full jump starting at `t`; returns the event from the falling edge.
    fn jump(d: &mut JumpDetector, t: u32) -> Option<JumpEvent> {
        assert_eq!(d.on_sample(HIGH, t), None);
        d.on_sample(LOW, t + 50)
    }

    #[test]
    fn starts_idle_and_empty() {
        let d = JumpDetector::new();
        assert_eq!(d.state(), JumpState::Idle);
        assert_eq!(d.count(), 0);
        assert_eq!(d.last_jump_ms(), 0);
        assert_eq!(d.goal(), JUMP_GOAL);
    }

    #[test]
    fn rising_then_falling_confirms_one_jump() {
        let mut d = JumpDetector::new();
        assert_eq!(d.on_sample(HIGH, 1000), None);
        assert_eq!(d.state(), JumpState::Rising);
        assert_eq!(d.count(), 0);

        assert_eq!(d.on_sample(LOW, 1100), Some(JumpEvent::JumpCompleted { count: 1 }));
        assert_eq!(d.state(), JumpState::Idle);
        assert_eq!(d.count(), 1);
        assert_eq!(d.last_jump_ms(), 1100);
    }

    #[test]
    fn small_values_keep_state() {
        let mut d = JumpDetector::new();
        assert_eq!(d.on_sample(0.3, 1000), None);
        assert_eq!(d.state(), JumpState::Idle);

        d.on_sample(HIGH, 1010);
        for t in 1020..1100 {
            assert_eq!(d.on_sample(0.0, t), None);
        }
        assert_eq!(d.state(), JumpState::Rising);
    }

    #[test]
    fn falling_edge_from_idle_is_ignored() {
        let mut d = JumpDetector::new();
        assert_eq!(d.on_sample(LOW, 1000), None);
        assert_eq!(d.state(), JumpState::Idle);
        assert_eq!(d.count(), 0);
    }

    #[test]
    fn thresholds_are_strict() {
        let mut d = JumpDetector::new();
        d.on_sample(JUMP_THRESHOLD, 1000);
        assert_eq!(d.state(), JumpState::Idle);
        d.on_sample(HIGH, 1001);
        assert_eq!(d.on_sample(-JUMP_THRESHOLD, 1002), None);
        assert_eq!(d.state(), JumpState::Rising);
    }

    #[test]
    fn boot_window_blocks_transitions() {
        let mut d = JumpDetector::new();
        assert_eq!(d.on_sample(HIGH, 100), None);
        assert_eq!(d.state(), JumpState::Idle);
        assert_eq!(d.on_sample(HIGH, DEBOUNCE_TIME_MS), None);
        assert_eq!(d.state(), JumpState::Idle);
        d.on_sample(HIGH, DEBOUNCE_TIME_MS + 1);
        assert_eq!(d.state(), JumpState::Rising);
    }

    #[test]
    fn second_jump_inside_debounce_is_ignored() {
        let mut d = JumpDetector::new();
        assert_eq!(jump(&mut d, 1000), Some(JumpEvent::JumpCompleted { count: 1 }));
        let confirmed = d.last_jump_ms();

        // Both edges land inside the window, so neither registers.
        assert_eq!(d.on_sample(HIGH, confirmed + 100), None);
        assert_eq!(d.state(), JumpState::Idle);
        assert_eq!(d.on_sample(LOW, confirmed + 200), None);
        assert_eq!(d.count(), 1);

        // Exactly at the window edge is still blocked.
        assert_eq!(d.on_sample(HIGH, confirmed + DEBOUNCE_TIME_MS), None);
        assert_eq!(d.state(), JumpState::Idle);

        assert_eq!(
            jump(&mut d, confirmed + DEBOUNCE_TIME_MS + 1),
            Some(JumpEvent::JumpCompleted { count: 2 })
        );
    }

    #[test]
    fn goal_resets_counter() {
        let mut d = JumpDetector::new();
        let mut t = 1000;
        for n in 1..JUMP_GOAL {
            assert_eq!(jump(&mut d, t), Some(JumpEvent::JumpCompleted { count: n }));
            t += 1000;
        }
        assert_eq!(jump(&mut d, t), Some(JumpEvent::GoalReached));
        assert_eq!(d.count(), 0);
        assert_eq!(d.state(), JumpState::Idle);

        t += 1000;
        assert_eq!(jump(&mut d, t), Some(JumpEvent::JumpCompleted { count: 1 }));
    }

    #[test]
    fn elapsed_time_wraps() {
        let mut d = JumpDetector::with_params(1.5, 500, 5);
        let near_wrap = u32::MAX - 100;
        jump(&mut d, near_wrap);
        let confirmed = d.last_jump_ms();

        // 450 ms later, across the wrap: still inside the window.
        assert_eq!(d.on_sample(HIGH, confirmed.wrapping_add(450)), None);
        assert_eq!(d.state(), JumpState::Idle);

        d.on_sample(HIGH, confirmed.wrapping_add(600));
        assert_eq!(d.state(), JumpState::Rising);
    }

    #[test]
    fn custom_goal() {
        let mut d = JumpDetector::with_params(1.0, 0, 2);
        assert_eq!(d.on_sample(1.2, 10), None);
        assert_eq!(d.on_sample(-1.2, 20), Some(JumpEvent::JumpCompleted { count: 1 }));
        assert_eq!(d.on_sample(1.2, 30), None);
        assert_eq!(d.on_sample(-1.2, 40), Some(JumpEvent::GoalReached));
    }
}
