//! A live workout for one user.
//!
//! Binds a controller to a tick source and to the user's completed-workout
//! log. The scheduler is armed exactly while the controller counts down;
//! each completed workout is appended to the log once.

use super::controller::WorkoutController;
use super::plan::WorkoutPlan;
use super::scheduler::{IntervalScheduler, Scheduler};
use super::Phase;
use crate::events::Event;
use crate::stats::WorkoutLogStore;
use crate::storage::KeyValueStore;

pub struct WorkoutSession<'a, K: KeyValueStore + ?Sized, S: Scheduler> {
    controller: WorkoutController,
    scheduler: S,
    log: WorkoutLogStore<'a, K>,
    user_id: String,
}

impl<'a, K: KeyValueStore + ?Sized, S: Scheduler> WorkoutSession<'a, K, S> {
    pub fn new(kv: &'a K, user_id: impl Into<String>, plan: WorkoutPlan, scheduler: S) -> Self {
        Self {
            controller: WorkoutController::new(plan),
            scheduler,
            log: WorkoutLogStore::new(kv),
            user_id: user_id.into(),
        }
    }

    pub fn controller(&self) -> &WorkoutController {
        &self.controller
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn start_workout(&mut self) -> Vec<Event> {
        let events = self.controller.start_workout();
        self.settle(events)
    }

    pub fn start_exercise(&mut self) -> Vec<Event> {
        let events = self.controller.start_exercise();
        self.settle(events)
    }

    /// Deliver one scheduled tick. Ignored when nothing is armed.
    pub fn on_tick(&mut self) -> Vec<Event> {
        if !self.scheduler.is_armed() {
            return Vec::new();
        }
        let events = self.controller.tick();
        self.settle(events)
    }

    pub fn pause(&mut self) -> Vec<Event> {
        let events = self.controller.pause().into_iter().collect();
        self.settle(events)
    }

    pub fn resume(&mut self) -> Vec<Event> {
        let events = self.controller.resume().into_iter().collect();
        self.settle(events)
    }

    pub fn toggle_pause(&mut self) -> Vec<Event> {
        let events = self.controller.toggle_pause().into_iter().collect();
        self.settle(events)
    }

    pub fn reset(&mut self) -> Vec<Event> {
        let events = self.controller.reset().into_iter().collect();
        self.settle(events)
    }

    /// Follow a different routine from the start screen.
    pub fn set_plan(&mut self, plan: WorkoutPlan) {
        self.controller.set_plan(plan);
        self.sync_scheduler();
    }

    fn settle(&mut self, events: Vec<Event>) -> Vec<Event> {
        for event in &events {
            if let Event::WorkoutCompleted { date, .. } = event {
                self.log.append(&self.user_id, *date);
            }
        }
        self.sync_scheduler();
        events
    }

    fn sync_scheduler(&mut self) {
        if self.controller.is_running() {
            self.scheduler.arm();
        } else {
            self.scheduler.cancel();
        }
    }
}

impl<'a, K: KeyValueStore + ?Sized> WorkoutSession<'a, K, IntervalScheduler> {
    /// Run the workout in real time, starting every unit as soon as the
    /// previous one stops. Each event is passed to `on_event` as produced.
    pub async fn run_to_completion<F>(&mut self, mut on_event: F)
    where
        F: FnMut(&Event),
    {
        let mut emit = |events: Vec<Event>| events.iter().for_each(&mut on_event);

        if self.controller.phase() == Phase::Start {
            emit(self.start_workout());
        }
        while self.controller.phase() != Phase::Done {
            if !self.controller.is_running() {
                emit(self.start_exercise());
                continue;
            }
            if !self.scheduler.next_tick().await {
                break;
            }
            emit(self.on_tick());
        }
    }
}

impl<'a, K: KeyValueStore + ?Sized, S: Scheduler> Drop for WorkoutSession<'a, K, S> {
    fn drop(&mut self) {
        self.scheduler.cancel();
    }
}
