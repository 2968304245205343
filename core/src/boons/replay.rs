use rayon::prelude::*;

use super::{Boon, StackKind};
use crate::context::Player;

/// Replayed span: `[start, start + duration - tail_trim)`, averaged over `duration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayWindow {
    pub start: u64,
    pub duration: u64,
    pub tail_trim: u64,
}

impl ReplayWindow {
    pub fn new(start: u64, duration: u64) -> Self {
        Self {
            start,
            duration,
            tail_trim: 0,
        }
    }

    pub fn with_tail_trim(mut self, tail_trim: u64) -> Self {
        self.tail_trim = tail_trim;
        self
    }

    fn end(&self) -> u64 {
        self.start
            .saturating_add(self.duration.saturating_sub(self.tail_trim))
    }
}

/// Step through the window one millisecond at a time and store the average.
///
/// Stacks never expire on their own: an application stays active until a
/// clear event removes it. Off-cycle applications are not added. Stack
/// events earlier than the window are applied on its first tick.
pub fn replay(boon: &mut Boon, window: ReplayWindow) {
    if window.duration == 0 {
        boon.average = 0.0;
        return;
    }

    boon.stacks.sort_by_key(|stack| stack.start_time);
    let intensity = boon.definition.is_intensity();

    // buff instance ids of the currently active stacks
    let mut replay: Vec<u32> = Vec::new();
    let mut cursor = 0;
    let mut total: u64 = 0;

    for tick in window.start..window.end() {
        while let Some(stack) = boon
            .stacks
            .get(cursor)
            // `<=` rather than `==`: stacks before the window land on its first tick
            .filter(|stack| stack.start_time <= tick)
        {
            match stack.kind {
                StackKind::ClearAll => replay.clear(),
                StackKind::ClearOne => {
                    if let Some(pos) = replay.iter().position(|&id| id == stack.buff_instid) {
                        replay.remove(pos);
                    }
                }
                StackKind::Application if !stack.is_offcycle => replay.push(stack.buff_instid),
                StackKind::Application => {}
            }
            cursor += 1;
        }

        if intensity {
            total += replay.len() as u64;
        } else if !replay.is_empty() {
            total += 1;
        }
    }

    boon.average = (total as f64 / window.duration as f64) as f32;
}

fn replay_player(player: &mut Player, window: ReplayWindow) {
    for boon in player.boons.values_mut() {
        replay(boon, window);
    }
}

/// Replay every boon of every player. Players share no state, so each one
/// can run on its own rayon task.
pub fn replay_players(players: &mut [Player], window: ReplayWindow, parallel: bool) {
    if parallel {
        players
            .par_iter_mut()
            .for_each(|player| replay_player(player, window));
    } else {
        players
            .iter_mut()
            .for_each(|player| replay_player(player, window));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boons::BoonStack;
    use revtc_types::{BoonDefinition, BoonType, Stacking};

    fn might() -> Boon {
        Boon::new(BoonDefinition::new(BoonType::Might, Stacking::Intensity, 25))
    }

    fn quickness() -> Boon {
        Boon::new(BoonDefinition::new(BoonType::Quickness, Stacking::Duration, 5))
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-4,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_single_stack_never_cleared() {
        let mut boon = might();
        boon.stacks.push(BoonStack::application(0, 3000, false, 0));
        replay(&mut boon, ReplayWindow::new(0, 3000));
        assert_close(boon.average, 1.0);
    }

    #[test]
    fn test_clear_all_halfway() {
        let mut boon = might();
        boon.stacks.push(BoonStack::application(0, 3000, false, 0));
        boon.stacks.push(BoonStack::clear_all(1500));
        replay(&mut boon, ReplayWindow::new(0, 3000));
        assert_close(boon.average, 0.5);
    }

    #[test]
    fn test_intensity_counts_every_stack() {
        let mut boon = might();
        boon.stacks.push(BoonStack::application(1000, 5000, false, 1));
        boon.stacks.push(BoonStack::application(1000, 5000, false, 2));
        boon.stacks.push(BoonStack::application(1000, 5000, false, 3));
        replay(&mut boon, ReplayWindow::new(1000, 1000));
        assert_close(boon.average, 3.0);
    }

    #[test]
    fn test_duration_counts_presence_once() {
        let mut boon = quickness();
        boon.stacks.push(BoonStack::application(0, 5000, false, 1));
        boon.stacks.push(BoonStack::application(0, 5000, false, 2));
        replay(&mut boon, ReplayWindow::new(0, 1000));
        assert_close(boon.average, 1.0);
    }

    #[test]
    fn test_clear_one_removes_matching_stack() {
        let mut boon = might();
        boon.stacks.push(BoonStack::application(0, 9000, false, 7));
        boon.stacks.push(BoonStack::application(0, 9000, false, 8));
        boon.stacks.push(BoonStack::clear_one(500, 8));
        // no stack carries 99, nothing removed
        boon.stacks.push(BoonStack::clear_one(600, 99));
        replay(&mut boon, ReplayWindow::new(0, 1000));
        // 2 stacks for 500 ticks, 1 stack for 500 ticks
        assert_close(boon.average, 1.5);
    }

    #[test]
    fn test_offcycle_application_ignored() {
        let mut boon = quickness();
        boon.stacks.push(BoonStack::application(0, 1000, true, 0));
        replay(&mut boon, ReplayWindow::new(0, 1000));
        assert_close(boon.average, 0.0);
    }

    #[test]
    fn test_unsorted_stacks_are_ordered_first() {
        let mut boon = quickness();
        boon.stacks.push(BoonStack::clear_all(250));
        boon.stacks.push(BoonStack::application(0, 1000, false, 0));
        replay(&mut boon, ReplayWindow::new(0, 1000));
        assert_close(boon.average, 0.25);
    }

    #[test]
    fn test_stack_before_window_applies_on_first_tick() {
        let mut boon = quickness();
        boon.stacks.push(BoonStack::application(10, 1000, false, 0));
        boon.stacks.push(BoonStack::clear_all(600));
        replay(&mut boon, ReplayWindow::new(100, 1000));
        assert_close(boon.average, 0.5);
    }

    #[test]
    fn test_intensity_counts_past_max_stacks() {
        // the stream is trusted to respect max_stacks, replay does not cap it
        let mut boon = might();
        for id in 0..30 {
            boon.stacks.push(BoonStack::application(0, 1000, false, id));
        }
        replay(&mut boon, ReplayWindow::new(0, 100));
        assert_close(boon.average, 30.0);
    }

    #[test]
    fn test_tail_trim_shortens_window_not_divisor() {
        let mut boon = quickness();
        boon.stacks.push(BoonStack::application(0, 1000, false, 0));
        replay(&mut boon, ReplayWindow::new(0, 1000).with_tail_trim(50));
        assert_close(boon.average, 0.95);
    }

    #[test]
    fn test_zero_duration_window() {
        let mut boon = might();
        boon.stacks.push(BoonStack::application(0, 1000, false, 0));
        replay(&mut boon, ReplayWindow::new(0, 0));
        assert_close(boon.average, 0.0);
    }
}
