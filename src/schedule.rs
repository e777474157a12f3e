use super::*;

/// Domain actions a timer can carry. The page's behaviors never schedule
/// arbitrary callbacks; everything that runs later is one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TaskKind {
    EntranceStep(NodeId),
    ToastShow(NodeId),
    ToastHide(NodeId),
    ToastRemove(NodeId),
    StatsResolve,
    QuizSubmit(NodeId),
}

impl TaskKind {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::EntranceStep(_) => "entrance-step",
            Self::ToastShow(_) => "toast-show",
            Self::ToastHide(_) => "toast-hide",
            Self::ToastRemove(_) => "toast-remove",
            Self::StatsResolve => "stats-resolve",
            Self::QuizSubmit(_) => "quiz-submit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ScheduledTask {
    pub(crate) id: i64,
    pub(crate) due_at: i64,
    pub(crate) order: i64,
    pub(crate) kind: TaskKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTimer {
    pub id: i64,
    pub due_at: i64,
    pub order: i64,
}

#[derive(Debug)]
pub(crate) struct SchedulerState {
    pub(crate) task_queue: Vec<ScheduledTask>,
    pub(crate) now_ms: i64,
    pub(crate) timer_step_limit: usize,
    pub(crate) next_timer_id: i64,
    pub(crate) next_task_order: i64,
}

impl Default for SchedulerState {
    fn default() -> Self {
        Self {
            task_queue: Vec::new(),
            now_ms: 0,
            timer_step_limit: 10_000,
            next_timer_id: 1,
            next_task_order: 0,
        }
    }
}

impl SchedulerState {
    pub(crate) fn schedule(&mut self, kind: TaskKind, delay_ms: i64) -> i64 {
        let id = self.next_timer_id;
        self.next_timer_id += 1;
        let order = self.next_task_order;
        self.next_task_order += 1;
        self.task_queue.push(ScheduledTask {
            id,
            due_at: self.now_ms.saturating_add(delay_ms.max(0)),
            order,
            kind,
        });
        id
    }

    pub(crate) fn next_task_index(&self, due_limit: Option<i64>) -> Option<usize> {
        self.task_queue
            .iter()
            .enumerate()
            .filter(|(_, task)| due_limit.map_or(true, |limit| task.due_at <= limit))
            .min_by_key(|(_, task)| (task.due_at, task.order))
            .map(|(idx, _)| idx)
    }

    pub(crate) fn clear(&mut self, timer_id: i64) -> bool {
        let before = self.task_queue.len();
        self.task_queue.retain(|task| task.id != timer_id);
        self.task_queue.len() != before
    }

    pub(crate) fn clear_all(&mut self) -> usize {
        let cleared = self.task_queue.len();
        self.task_queue.clear();
        cleared
    }

    pub(crate) fn pending(&self) -> Vec<PendingTimer> {
        let mut timers = self
            .task_queue
            .iter()
            .map(|task| PendingTimer {
                id: task.id,
                due_at: task.due_at,
                order: task.order,
            })
            .collect::<Vec<_>>();
        timers.sort_by_key(|timer| (timer.due_at, timer.order));
        timers
    }
}
