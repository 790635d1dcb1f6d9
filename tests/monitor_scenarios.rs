use std::time::{Duration, Instant};

use tonesynth::{
    AudioFormat, Fault, Monitor, SampleStream, SharedToneEngine, UnderrunSignal,
};

const BUFFER: Duration = Duration::from_millis(100);

struct Rig {
    node: SharedToneEngine,
    monitor: Monitor,
    underruns: UnderrunSignal,
    t0: Instant,
}

impl Rig {
    fn started() -> Self {
        let (node, handle) = SharedToneEngine::new(AudioFormat::mono_f32(44_100).unwrap());
        handle.start();

        let underruns = UnderrunSignal::new();
        let mut monitor = Monitor::new(node.engine().meter(), underruns.clone(), BUFFER);
        let t0 = Instant::now();
        monitor.start(t0);

        Self {
            node,
            monitor,
            underruns,
            t0,
        }
    }

    fn armed_at(&self) -> Instant {
        self.t0 + self.monitor.grace_period()
    }

    fn pull_block(&mut self) {
        let mut block = [0.0f32; 441];
        self.node.render(&mut block);
    }
}

#[test]
fn stall_fires_once_then_disarms() {
    let mut rig = Rig::started();

    assert_eq!(rig.monitor.poll(rig.armed_at()), None);
    assert!(rig.monitor.is_armed());

    // Nothing pulled for one full interval
    let check = rig.armed_at() + rig.monitor.poll_interval();
    assert_eq!(rig.monitor.poll(check), Some(Fault::Stall));
    assert!(!rig.monitor.is_armed());
    assert!(rig.monitor.is_disarmed());

    // No repeats, even if pulls or underruns show up again
    for i in 1..=5u32 {
        rig.pull_block();
        rig.underruns.raise();
        let later = check + rig.monitor.poll_interval() * i;
        assert_eq!(rig.monitor.poll(later), None);
    }
}

#[test]
fn restart_rearms_after_a_stall() {
    let mut rig = Rig::started();
    rig.monitor.poll(rig.armed_at());
    let check = rig.armed_at() + rig.monitor.poll_interval();
    assert_eq!(rig.monitor.poll(check), Some(Fault::Stall));

    rig.monitor.start(check);
    let armed = check + rig.monitor.grace_period();
    rig.monitor.poll(armed);
    assert!(rig.monitor.is_armed());

    rig.pull_block();
    assert_eq!(rig.monitor.poll(armed + rig.monitor.poll_interval()), None);
    assert_eq!(
        rig.monitor.poll(armed + rig.monitor.poll_interval() * 2),
        Some(Fault::Stall)
    );
}

#[test]
fn steady_pulls_never_stall() {
    let mut rig = Rig::started();
    rig.monitor.poll(rig.armed_at());

    for i in 1..=20u32 {
        rig.pull_block();
        let now = rig.armed_at() + rig.monitor.poll_interval() * i;
        assert_eq!(rig.monitor.poll(now), None);
    }
    assert!(rig.monitor.is_armed());
}

#[test]
fn closed_stream_counts_as_stalled() {
    let (mut node, handle) = SharedToneEngine::new(AudioFormat::mono_f32(44_100).unwrap());
    let underruns = UnderrunSignal::new();
    let mut monitor = Monitor::new(node.engine().meter(), underruns, BUFFER);
    let t0 = Instant::now();
    monitor.start(t0);
    monitor.poll(t0 + monitor.grace_period());

    // The pipeline keeps calling, but the engine channel is closed
    handle.stop();
    let mut block = [0.0f32; 128];
    node.render(&mut block);

    let check = t0 + monitor.grace_period() + monitor.poll_interval();
    assert_eq!(monitor.poll(check), Some(Fault::Stall));
}

#[test]
fn underrun_fires_once_and_stays_armed() {
    let mut rig = Rig::started();
    rig.monitor.poll(rig.armed_at());

    rig.underruns.raise();
    let soon = rig.armed_at() + Duration::from_millis(10);
    assert_eq!(rig.monitor.poll(soon), Some(Fault::Underrun));
    assert!(rig.monitor.is_armed());

    assert_eq!(rig.monitor.poll(soon + Duration::from_millis(10)), None);

    // Still watching: a later underrun is reported too
    rig.underruns.raise();
    assert_eq!(
        rig.monitor.poll(soon + Duration::from_millis(20)),
        Some(Fault::Underrun)
    );
}

#[test]
fn pushed_underruns_only_count_while_armed() {
    let mut rig = Rig::started();
    assert_eq!(rig.monitor.notify_underrun(), None);

    rig.monitor.poll(rig.armed_at());
    assert_eq!(rig.monitor.notify_underrun(), Some(Fault::Underrun));
    assert!(rig.monitor.is_armed());
}

#[test]
fn stall_wins_over_a_simultaneous_underrun() {
    let mut rig = Rig::started();
    rig.monitor.poll(rig.armed_at());

    rig.underruns.raise();
    let check = rig.armed_at() + rig.monitor.poll_interval();
    assert_eq!(rig.monitor.poll(check), Some(Fault::Stall));
    assert_eq!(rig.monitor.poll(check + Duration::from_millis(1)), None);
}
