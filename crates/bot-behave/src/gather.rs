use bot_aim::{AimScheduler, AimTarget, AimTask, Easing, PriorityTier, UntilAligned, Vec3};
use bot_core::{ActionQueue, TickContext};
use bot_tools::{TraceEvent, TraceLog};

use crate::actions::{approach_point, BreakBlockAction, MoveToAction, WaitAction};
use crate::toggle::Toggle;
use crate::world::{BlockPos, MineWorldMut};

#[derive(Debug, Clone, Copy)]
pub struct GatherConfig {
    /// Radius around the scan origin searched for deposits.
    pub scan_radius: f32,
    /// Maximum interaction distance to a block center.
    pub reach: f32,
    /// Arrival distance for movement goals.
    pub arrival: f32,
    /// Health fraction below which the safety check trips.
    pub low_health_frac: f32,
    /// Tick budget for a single movement action.
    pub move_timeout_ticks: u32,
    /// Tick budget for a single break action (including its approach).
    pub break_timeout_ticks: u32,
    /// Extra Mining passes allowed when a deposit survives the first one.
    pub mine_retries: u32,
    /// Pause between veins, lets the environment settle (drops, gravity).
    pub settle_ticks: u32,
}

impl Default for GatherConfig {
    fn default() -> Self {
        Self {
            scan_radius: 12.0,
            reach: 4.0,
            arrival: 0.5,
            low_health_frac: 0.5,
            move_timeout_ticks: 200,
            break_timeout_ticks: 200,
            mine_retries: 1,
            settle_ticks: 2,
        }
    }
}

/// Phases of the gathering loop.
///
/// `Advance` loops back to `Scan`; `Recover` and `Idle` are the terminal
/// path, entered through the safety check or a disable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatherState {
    Initialize,
    Scan,
    Branch,
    Mining,
    Check,
    Advance,
    Recover,
    Idle,
}

impl GatherState {
    fn index(self) -> u64 {
        match self {
            GatherState::Initialize => 0,
            GatherState::Scan => 1,
            GatherState::Branch => 2,
            GatherState::Mining => 3,
            GatherState::Check => 4,
            GatherState::Advance => 5,
            GatherState::Recover => 6,
            GatherState::Idle => 7,
        }
    }
}

/// Multi-phase resource-gathering routine.
///
/// Per state, entry enqueues actions (and aim tasks) and then waits for the
/// queue to drain before transitioning; the queue and scheduler are explicit
/// context objects passed in by the host, never globals. A safety check runs
/// every tick regardless of state, and any unrecoverable precondition
/// failure disables the routine rather than leaving it stuck.
pub struct GatherRoutine {
    config: GatherConfig,
    toggle: Toggle,
    state: GatherState,
    anchor: Option<Vec3>,
    scan_origin: Option<Vec3>,
    deposit: Option<BlockPos>,
    mine_passes: u32,
    mined: u32,
    trace: TraceLog,
}

impl GatherRoutine {
    pub fn new(config: GatherConfig) -> Self {
        Self {
            config,
            toggle: Toggle::Disabled,
            state: GatherState::Idle,
            anchor: None,
            scan_origin: None,
            deposit: None,
            mine_passes: 0,
            mined: 0,
            trace: TraceLog::default(),
        }
    }

    pub fn state(&self) -> GatherState {
        self.state
    }

    pub fn toggle(&self) -> Toggle {
        self.toggle
    }

    pub fn mined(&self) -> u32 {
        self.mined
    }

    pub fn drain_trace(&mut self) -> Vec<TraceEvent> {
        self.trace.drain()
    }

    /// Flip the enable state and apply the transition synchronously: enable
    /// resets to `Initialize`, disable hard-cancels all queued work and
    /// releases held environment effects.
    pub fn set_enabled<W>(
        &mut self,
        enabled: bool,
        ctx: &TickContext,
        agent: W::Agent,
        env: &mut W,
        queue: &mut ActionQueue<W>,
        aim: &mut AimScheduler<W>,
    ) where
        W: MineWorldMut + 'static,
    {
        let next = if enabled {
            Toggle::Enabled
        } else {
            Toggle::Disabled
        };
        if next == self.toggle {
            return;
        }
        self.toggle = next;

        match self.toggle {
            Toggle::Enabled => {
                self.anchor = None;
                self.scan_origin = None;
                self.deposit = None;
                self.mine_passes = 0;
                self.set_state(GatherState::Initialize, ctx);
                self.trace.push(TraceEvent::new(ctx.tick, "gather.enabled"));
            }
            Toggle::Disabled => {
                queue.clear();
                aim.clear();
                env.cancel_break(agent);
                env.set_move_intent(agent, None);
                self.set_state(GatherState::Idle, ctx);
                self.trace.push(TraceEvent::new(ctx.tick, "gather.disabled"));
            }
        }
    }

    /// Advance the routine by one tick. The host drives the queue and the
    /// scheduler separately; this only runs the safety check and the state
    /// machine itself.
    pub fn tick<W>(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        env: &mut W,
        queue: &mut ActionQueue<W>,
        aim: &mut AimScheduler<W>,
    ) where
        W: MineWorldMut + 'static,
    {
        if !self.toggle.is_enabled() {
            return;
        }

        // Escalation path, checked every tick regardless of state.
        if !matches!(self.state, GatherState::Recover | GatherState::Idle)
            && self.health_low(agent, env)
        {
            self.interrupt(ctx, agent, env, queue, aim);
            return;
        }

        if !queue.is_empty() {
            return;
        }

        match self.state {
            GatherState::Initialize => self.enter_initialize(ctx, agent, env, queue, aim),
            GatherState::Scan => self.enter_scan(ctx, agent, env, queue, aim),
            GatherState::Branch => self.enter_branch(ctx, agent, env, queue, aim),
            GatherState::Mining => self.enter_mining(ctx, queue, aim),
            GatherState::Check => self.enter_check(ctx, agent, env, queue, aim),
            GatherState::Advance => self.enter_advance(ctx, queue),
            GatherState::Recover => {
                // The emergency return has drained; stand down.
                self.trace.push(TraceEvent::new(ctx.tick, "gather.recovered"));
                self.set_enabled(false, ctx, agent, env, queue, aim);
            }
            GatherState::Idle => {}
        }
    }

    fn health_low<W>(&self, agent: W::Agent, env: &W) -> bool
    where
        W: MineWorldMut + 'static,
    {
        env.health(agent) < self.config.low_health_frac * env.max_health(agent)
    }

    /// Hard-cancel everything in flight and route home ahead of all other
    /// work. Escalation, not retry: the routine disables itself once the
    /// return completes.
    fn interrupt<W>(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        env: &mut W,
        queue: &mut ActionQueue<W>,
        aim: &mut AimScheduler<W>,
    ) where
        W: MineWorldMut + 'static,
    {
        self.trace.push(
            TraceEvent::new(ctx.tick, "gather.safety")
                .with_a(env.health(agent).max(0.0) as u64),
        );

        queue.clear();
        aim.clear();
        env.cancel_break(agent);
        env.set_move_intent(agent, None);

        let Some(anchor) = self.anchor else {
            // Never initialized; nothing to return to.
            self.set_enabled(false, ctx, agent, env, queue, aim);
            return;
        };

        queue.push_front(Box::new(MoveToAction::new(
            anchor,
            self.config.arrival,
            self.config.move_timeout_ticks * 2,
        )));
        aim.add_task(AimTask::new(
            PriorityTier::Immediate,
            AimTarget::Waypoint(anchor),
            Box::new(UntilAligned::new(5.0)),
            Easing::EaseOut,
        ));
        self.set_state(GatherState::Recover, ctx);
    }

    fn enter_initialize<W>(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        env: &mut W,
        queue: &mut ActionQueue<W>,
        aim: &mut AimScheduler<W>,
    ) where
        W: MineWorldMut + 'static,
    {
        let Some(pos) = env.position(agent) else {
            self.set_enabled(false, ctx, agent, env, queue, aim);
            return;
        };

        self.anchor = Some(pos);
        self.scan_origin = Some(pos);
        self.set_state(GatherState::Scan, ctx);
    }

    fn enter_scan<W>(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        env: &mut W,
        queue: &mut ActionQueue<W>,
        aim: &mut AimScheduler<W>,
    ) where
        W: MineWorldMut + 'static,
    {
        let origin = self.scan_origin.or_else(|| env.position(agent));
        let deposit = origin.and_then(|origin| env.nearest_deposit(origin, self.config.scan_radius));

        match deposit {
            Some(pos) => {
                self.deposit = Some(pos);
                self.mine_passes = 0;
                self.set_state(GatherState::Branch, ctx);
            }
            None => {
                self.trace.push(TraceEvent::new(ctx.tick, "gather.scan.none"));
                self.set_enabled(false, ctx, agent, env, queue, aim);
            }
        }
    }

    fn enter_branch<W>(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        env: &mut W,
        queue: &mut ActionQueue<W>,
        aim: &mut AimScheduler<W>,
    ) where
        W: MineWorldMut + 'static,
    {
        let stand = self.deposit.and_then(|deposit| approach_point(env, deposit));

        let Some(stand) = stand else {
            self.trace
                .push(TraceEvent::new(ctx.tick, "gather.branch.blocked"));
            self.set_enabled(false, ctx, agent, env, queue, aim);
            return;
        };

        queue.push_back(Box::new(MoveToAction::new(
            stand,
            self.config.arrival,
            self.config.move_timeout_ticks,
        )));
        aim.add_task(AimTask::new(
            PriorityTier::Preferential,
            AimTarget::Waypoint(stand),
            Box::new(UntilAligned::new(10.0)),
            Easing::EaseOut,
        ));
        self.set_state(GatherState::Mining, ctx);
    }

    fn enter_mining<W>(
        &mut self,
        ctx: &TickContext,
        queue: &mut ActionQueue<W>,
        aim: &mut AimScheduler<W>,
    ) where
        W: MineWorldMut + 'static,
    {
        let Some(deposit) = self.deposit else {
            // Lost track of the vein; rescan.
            self.set_state(GatherState::Scan, ctx);
            return;
        };

        self.mine_passes += 1;
        aim.add_task(AimTask::new(
            PriorityTier::Preferential,
            AimTarget::FixedPoint(deposit.center()),
            Box::new(UntilAligned::new(2.5)),
            Easing::EaseInOut,
        ));
        queue.push_back(Box::new(BreakBlockAction::new(
            deposit,
            self.config.reach,
            self.config.break_timeout_ticks,
        )));
        self.set_state(GatherState::Check, ctx);
    }

    fn enter_check<W>(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        env: &mut W,
        queue: &mut ActionQueue<W>,
        aim: &mut AimScheduler<W>,
    ) where
        W: MineWorldMut + 'static,
    {
        let Some(deposit) = self.deposit else {
            self.set_state(GatherState::Scan, ctx);
            return;
        };

        if env.is_solid(deposit) {
            if self.mine_passes > self.config.mine_retries {
                self.trace
                    .push(TraceEvent::new(ctx.tick, "gather.mine.stuck"));
                self.set_enabled(false, ctx, agent, env, queue, aim);
            } else {
                self.set_state(GatherState::Mining, ctx);
            }
            return;
        }

        self.mined += 1;
        self.trace
            .push(TraceEvent::new(ctx.tick, "gather.mined").with_a(self.mined as u64));
        self.set_state(GatherState::Advance, ctx);
    }

    fn enter_advance<W>(&mut self, ctx: &TickContext, queue: &mut ActionQueue<W>)
    where
        W: MineWorldMut + 'static,
    {
        self.scan_origin = self.deposit.map(BlockPos::center).or(self.scan_origin);
        self.deposit = None;
        queue.push_back(Box::new(WaitAction::new(self.config.settle_ticks)));
        self.set_state(GatherState::Scan, ctx);
    }

    fn set_state(&mut self, next: GatherState, ctx: &TickContext) {
        if next == self.state {
            return;
        }
        self.state = next;
        self.trace
            .push(TraceEvent::new(ctx.tick, "gather.state").with_a(next.index()));
    }
}
