use std::collections::BTreeMap;

use bot_aim::{
    AimFeedback, AimScheduler, AimTarget, AimTask, AimWorldMut, AimWorldView, ConditionResult,
    Easing, EntityId, Orientation, PriorityTier, Vec3, Watch,
};
use bot_core::{EnvMut, EnvView, TickContext};

#[derive(Debug, Default)]
struct AimEnv {
    orientation: Orientation,
    eye: Vec3,
    entities: BTreeMap<u64, Vec3>,
}

impl EnvView for AimEnv {
    type Agent = u64;
}

impl EnvMut for AimEnv {}

impl AimWorldView for AimEnv {
    fn orientation(&self, _agent: u64) -> Option<Orientation> {
        Some(self.orientation)
    }

    fn eye_position(&self, _agent: u64) -> Option<Vec3> {
        Some(self.eye)
    }

    fn entity_position(&self, id: EntityId) -> Option<Vec3> {
        self.entities.get(&id.0).copied()
    }
}

impl AimWorldMut for AimEnv {
    fn set_orientation(&mut self, _agent: u64, orientation: Orientation) {
        self.orientation = orientation;
    }
}

fn suspend(
    _ctx: &TickContext,
    _agent: u64,
    _env: &AimEnv,
    _feedback: &AimFeedback,
) -> ConditionResult {
    ConditionResult::Suspend
}

fn succeed(
    _ctx: &TickContext,
    _agent: u64,
    _env: &AimEnv,
    _feedback: &AimFeedback,
) -> ConditionResult {
    ConditionResult::Success
}

fn parked(priority: PriorityTier, mark: f32) -> AimTask<AimEnv> {
    AimTask::new(
        priority,
        AimTarget::FixedPoint(Vec3::new(mark, 0.0, 0.0)),
        Box::new(Watch::new(suspend)),
        Easing::Linear,
    )
}

fn current_mark(scheduler: &AimScheduler<AimEnv>) -> Option<f32> {
    match scheduler.current().map(|task| task.target()) {
        Some(AimTarget::FixedPoint(point)) => Some(point.x),
        _ => None,
    }
}

#[test]
fn preferential_processes_before_a_queued_normal() {
    let mut scheduler = AimScheduler::new();

    scheduler.add_task(parked(PriorityTier::Normal, 1.0));
    scheduler.add_task(parked(PriorityTier::Preferential, 2.0));

    assert_eq!(current_mark(&scheduler), Some(2.0));
    assert_eq!(scheduler.task_count(), 2);
}

#[test]
fn immediate_jumps_ahead_of_everything() {
    let mut scheduler = AimScheduler::new();

    scheduler.add_task(parked(PriorityTier::Preferential, 1.0));
    scheduler.add_task(parked(PriorityTier::Normal, 2.0));
    scheduler.add_task(parked(PriorityTier::Immediate, 3.0));

    assert_eq!(current_mark(&scheduler), Some(3.0));
}

#[test]
fn normal_tasks_stay_fifo() {
    let mut scheduler = AimScheduler::new();

    scheduler.add_task(parked(PriorityTier::Normal, 1.0));
    scheduler.add_task(parked(PriorityTier::Normal, 2.0));

    assert_eq!(current_mark(&scheduler), Some(1.0));
}

#[test]
fn preferential_queues_behind_earlier_preferential_work() {
    let mut scheduler = AimScheduler::new();
    let mut env = AimEnv::default();

    // Head finishes on its first check, exposing the insertion order.
    scheduler.add_task(AimTask::new(
        PriorityTier::Preferential,
        AimTarget::FixedPoint(Vec3::new(1.0, 0.0, 0.0)),
        Box::new(Watch::new(succeed)),
        Easing::Linear,
    ));
    scheduler.add_task(parked(PriorityTier::Normal, 2.0));
    scheduler.add_task(parked(PriorityTier::Preferential, 3.0));

    assert_eq!(current_mark(&scheduler), Some(1.0));

    let ctx = TickContext::new(0, 50.0);
    scheduler.process(&ctx, 1, &mut env);

    // The later preferential task sits between the first and the normal.
    assert_eq!(current_mark(&scheduler), Some(3.0));
    assert_eq!(scheduler.task_count(), 2);
}
