//! One task per dashboard widget, run strictly in sequence.

pub mod birthday;
pub mod budget;
pub mod headline;
pub mod habit;
pub mod meeting;
pub mod message;
pub mod todo;
pub mod weather;

pub use birthday::BirthdayTask;
pub use budget::BudgetTask;
pub use habit::HabitTask;
pub use headline::HeadlineTask;
pub use meeting::MeetingTask;
pub use message::MessageTask;
pub use todo::ToDoTask;
pub use weather::{WeatherInput, WeatherTask};

use crate::core::error::Result;
use crate::core::task::Task;
use tracing::info;

/// Runs every task in order. The first failure aborts the remaining tasks.
pub async fn run_all(tasks: &[Box<dyn Task>]) -> Result<()> {
    for task in tasks {
        info!(task = task.name(), "Updating widget");
        task.run().await?;
        info!(task = task.name(), "Widget updated");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    struct Probe {
        name: &'static str,
        fail: bool,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl Task for Probe {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn run(&self) -> Result<()> {
            self.log.lock().unwrap().push(self.name);
            if self.fail {
                return Err(Error::UnknownCurrency("xyz".to_string()));
            }
            Ok(())
        }
    }

    fn probe(name: &'static str, fail: bool, log: &Arc<Mutex<Vec<&'static str>>>) -> Box<dyn Task> {
        Box::new(Probe {
            name,
            fail,
            log: Arc::clone(log),
        })
    }

    #[tokio::test]
    async fn test_runs_each_task_once_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let tasks = vec![
            probe("budget", false, &log),
            probe("meeting", false, &log),
            probe("todo", false, &log),
        ];

        run_all(&tasks).await.unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["budget", "meeting", "todo"]);
    }

    #[tokio::test]
    async fn test_failure_aborts_remaining_tasks() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let tasks = vec![
            probe("budget", false, &log),
            probe("meeting", true, &log),
            probe("todo", false, &log),
        ];

        let err = run_all(&tasks).await.unwrap_err();
        assert!(matches!(err, Error::UnknownCurrency(_)));
        assert_eq!(*log.lock().unwrap(), vec!["budget", "meeting"]);
    }
}
