use bot_core::{
    ActionQueue, ActionState, AutomationAction, EnvMut, EnvView, SubActions, TickContext,
};

#[derive(Debug, Default)]
struct RecordingEnv {
    ticked: Vec<&'static str>,
    finished: Vec<(&'static str, ActionState)>,
}

impl EnvView for RecordingEnv {
    type Agent = u64;
}

impl EnvMut for RecordingEnv {}

/// Runs for `work` ticks, then reports `result`.
struct ScriptedAction {
    name: &'static str,
    work: u32,
    done: u32,
    result: ActionState,
}

impl ScriptedAction {
    fn new(name: &'static str, work: u32, result: ActionState) -> Self {
        Self {
            name,
            work,
            done: 0,
            result,
        }
    }
}

impl AutomationAction<RecordingEnv> for ScriptedAction {
    fn state(&self, _ctx: &TickContext, _agent: u64, _env: &RecordingEnv) -> ActionState {
        if self.done >= self.work {
            self.result
        } else {
            ActionState::Progress
        }
    }

    fn tick(
        &mut self,
        _ctx: &TickContext,
        _agent: u64,
        env: &mut RecordingEnv,
        _sub: &mut SubActions<RecordingEnv>,
    ) {
        self.done += 1;
        env.ticked.push(self.name);
    }

    fn on_success(&mut self, _ctx: &TickContext, _agent: u64, env: &mut RecordingEnv) {
        env.finished.push((self.name, ActionState::Success));
    }

    fn on_failure(&mut self, _ctx: &TickContext, _agent: u64, env: &mut RecordingEnv) {
        env.finished.push((self.name, ActionState::Failure));
    }
}

/// Pushes a one-tick sub-action on its first tick, then finishes on the
/// second. Used to check that decomposition preempts the parent.
struct SplittingAction {
    spawned: bool,
    resumed: bool,
}

impl SplittingAction {
    fn new() -> Self {
        Self {
            spawned: false,
            resumed: false,
        }
    }
}

impl AutomationAction<RecordingEnv> for SplittingAction {
    fn state(&self, _ctx: &TickContext, _agent: u64, _env: &RecordingEnv) -> ActionState {
        if self.resumed {
            ActionState::Success
        } else {
            ActionState::Progress
        }
    }

    fn tick(
        &mut self,
        _ctx: &TickContext,
        _agent: u64,
        env: &mut RecordingEnv,
        sub: &mut SubActions<RecordingEnv>,
    ) {
        if !self.spawned {
            self.spawned = true;
            env.ticked.push("parent");
            sub.push(Box::new(ScriptedAction::new("sub", 1, ActionState::Success)));
            return;
        }

        self.resumed = true;
        env.ticked.push("parent");
    }
}

fn ctx(tick: u64) -> TickContext {
    TickContext::new(tick, 50.0)
}

fn run_one_tick(queue: &mut ActionQueue<RecordingEnv>, env: &mut RecordingEnv, tick: u64) {
    let ctx = ctx(tick);
    queue.tick(&ctx, 1, env);
    queue.evaluate(&ctx, 1, env);
}

#[test]
fn only_the_head_is_ticked() {
    let mut queue = ActionQueue::new();
    let mut env = RecordingEnv::default();

    queue.push_back(Box::new(ScriptedAction::new("a", 3, ActionState::Success)));
    queue.push_back(Box::new(ScriptedAction::new("b", 3, ActionState::Success)));

    run_one_tick(&mut queue, &mut env, 0);

    assert_eq!(env.ticked, vec!["a"]);
    assert_eq!(queue.len(), 2);
}

#[test]
fn popping_a_single_action_empties_the_queue() {
    let mut queue = ActionQueue::new();
    let mut env = RecordingEnv::default();

    queue.push_back(Box::new(ScriptedAction::new("a", 1, ActionState::Success)));

    run_one_tick(&mut queue, &mut env, 0);

    assert!(queue.is_empty());
    assert_eq!(env.finished, vec![("a", ActionState::Success)]);
}

#[test]
fn failure_invokes_on_failure_then_pops() {
    let mut queue = ActionQueue::new();
    let mut env = RecordingEnv::default();

    queue.push_back(Box::new(ScriptedAction::new("a", 2, ActionState::Failure)));
    queue.push_back(Box::new(ScriptedAction::new("b", 1, ActionState::Success)));

    for tick in 0..4 {
        run_one_tick(&mut queue, &mut env, tick);
    }

    assert!(queue.is_empty());
    assert_eq!(
        env.finished,
        vec![("a", ActionState::Failure), ("b", ActionState::Success)]
    );
}

#[test]
fn clear_is_a_hard_cancel_without_callbacks() {
    let mut queue = ActionQueue::new();
    let mut env = RecordingEnv::default();

    queue.push_back(Box::new(ScriptedAction::new("a", 5, ActionState::Success)));
    queue.push_back(Box::new(ScriptedAction::new("b", 5, ActionState::Failure)));

    run_one_tick(&mut queue, &mut env, 0);
    queue.clear();

    assert!(queue.is_empty());
    assert!(env.finished.is_empty());
}

#[test]
fn front_inserted_sub_action_completes_before_parent_resumes() {
    let mut queue = ActionQueue::new();
    let mut env = RecordingEnv::default();

    queue.push_back(Box::new(SplittingAction::new()));

    // Tick 0: parent spawns the sub-action; it becomes the head.
    // Tick 1: sub runs and finishes. Tick 2: parent resumes and finishes.
    for tick in 0..3 {
        run_one_tick(&mut queue, &mut env, tick);
    }

    assert_eq!(env.ticked, vec!["parent", "sub", "parent"]);
    assert_eq!(env.finished, vec![("sub", ActionState::Success)]);
    assert!(queue.is_empty());
}

#[test]
fn external_push_front_preempts_the_running_head() {
    let mut queue = ActionQueue::new();
    let mut env = RecordingEnv::default();

    queue.push_back(Box::new(ScriptedAction::new("slow", 4, ActionState::Success)));
    run_one_tick(&mut queue, &mut env, 0);

    queue.push_front(Box::new(ScriptedAction::new(
        "urgent",
        1,
        ActionState::Success,
    )));
    run_one_tick(&mut queue, &mut env, 1);
    run_one_tick(&mut queue, &mut env, 2);

    assert_eq!(env.ticked, vec!["slow", "urgent", "slow"]);
    assert_eq!(env.finished, vec![("urgent", ActionState::Success)]);
}
