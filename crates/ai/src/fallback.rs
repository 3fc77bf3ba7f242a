//! Ordered fallback over interchangeable candidates.
//!
//! The executor tries candidates one at a time in list order. A success ends
//! the run, a terminal failure ends it with that failure, and a retryable
//! failure moves on to the next candidate. When the list is exhausted the
//! last failure is returned. Nothing runs concurrently and no candidate is
//! tried twice.

use log::{info, warn};
use std::fmt::Display;
use std::future::Future;

/// How a failed attempt affects the rest of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Another candidate may succeed where this one failed.
    Retryable,
    /// Stop immediately; no other candidate is tried.
    Terminal,
}

/// A non-empty, ordered list of candidates.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidates<C> {
    first: C,
    rest: Vec<C>,
}

impl<C> Candidates<C> {
    /// Returns `None` for an empty list.
    pub fn new(items: Vec<C>) -> Option<Self> {
        let mut items = items.into_iter();
        let first = items.next()?;
        Some(Self {
            first,
            rest: items.collect(),
        })
    }

    pub fn single(first: C) -> Self {
        Self {
            first,
            rest: Vec::new(),
        }
    }

    pub fn with_fallbacks(first: C, rest: impl IntoIterator<Item = C>) -> Self {
        Self {
            first,
            rest: rest.into_iter().collect(),
        }
    }

    pub fn first(&self) -> &C {
        &self.first
    }

    pub fn len(&self) -> usize {
        1 + self.rest.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &C> {
        std::iter::once(&self.first).chain(self.rest.iter())
    }
}

impl<C> IntoIterator for Candidates<C> {
    type Item = C;
    type IntoIter = std::iter::Chain<std::iter::Once<C>, std::vec::IntoIter<C>>;

    fn into_iter(self) -> Self::IntoIter {
        std::iter::once(self.first).chain(self.rest)
    }
}

/// A candidate that failed retryably before the run moved on.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedAttempt<C> {
    pub candidate: C,
    pub class: FailureClass,
}

/// Result of a fallback run, tagged with the candidate that produced it.
#[derive(Debug)]
pub enum FallbackOutcome<C, T, E> {
    Succeeded {
        candidate: C,
        value: T,
        skipped: Vec<SkippedAttempt<C>>,
    },
    Failed {
        candidate: C,
        error: E,
        class: FailureClass,
        skipped: Vec<SkippedAttempt<C>>,
    },
}

impl<C, T, E> FallbackOutcome<C, T, E> {
    pub fn into_result(self) -> Result<T, E> {
        match self {
            FallbackOutcome::Succeeded { value, .. } => Ok(value),
            FallbackOutcome::Failed { error, .. } => Err(error),
        }
    }

    /// The candidate whose attempt decided the outcome.
    pub fn candidate(&self) -> &C {
        match self {
            FallbackOutcome::Succeeded { candidate, .. }
            | FallbackOutcome::Failed { candidate, .. } => candidate,
        }
    }

    pub fn skipped(&self) -> &[SkippedAttempt<C>] {
        match self {
            FallbackOutcome::Succeeded { skipped, .. }
            | FallbackOutcome::Failed { skipped, .. } => skipped,
        }
    }

    /// Number of candidates that were invoked.
    pub fn attempts(&self) -> usize {
        self.skipped().len() + 1
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FallbackOutcome::Succeeded { .. })
    }
}

fn log_skip<C: Display, E: Display>(candidate: &C, error: &E, next: &C) {
    warn!(
        "Candidate {} unavailable (retryable: {}), trying {}",
        candidate, error, next
    );
}

fn log_stop<C: Display, E: Display>(candidate: &C, error: &E, class: FailureClass, attempts: usize) {
    match class {
        FailureClass::Retryable => warn!(
            "Candidate {} unavailable ({}); no candidates left after {} attempts",
            candidate, error, attempts
        ),
        FailureClass::Terminal => info!("Candidate {} failed terminally: {}", candidate, error),
    }
}

/// Runs `operation` over the candidates until one succeeds, one fails
/// terminally, or the list is exhausted.
pub async fn execute<C, T, E, K, F, Fut>(
    candidates: Candidates<C>,
    classify: K,
    operation: F,
) -> FallbackOutcome<C, T, E>
where
    C: Clone + Display,
    E: Display,
    K: Fn(&E) -> FailureClass,
    F: FnMut(C) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    execute_until(
        candidates,
        classify,
        std::future::pending::<()>(),
        |_| unreachable!("a pending future never cancels"),
        operation,
    )
    .await
}

/// Like [`execute`], but every attempt races `cancel`. If `cancel` completes
/// first, the in-flight attempt is dropped and the run ends with
/// `on_cancel(candidate)` classified as terminal.
pub async fn execute_until<C, T, E, K, F, Fut, X, G>(
    candidates: Candidates<C>,
    classify: K,
    cancel: X,
    on_cancel: G,
    mut operation: F,
) -> FallbackOutcome<C, T, E>
where
    C: Clone + Display,
    E: Display,
    K: Fn(&E) -> FailureClass,
    F: FnMut(C) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    X: Future<Output = ()>,
    G: FnOnce(C) -> E,
{
    tokio::pin!(cancel);

    let Candidates { first, rest } = candidates;
    let mut remaining = rest.into_iter();
    let mut candidate = first;
    let mut skipped = Vec::new();

    loop {
        let attempt = operation(candidate.clone());
        let result = tokio::select! {
            biased;
            _ = &mut cancel => None,
            result = attempt => Some(result),
        };

        let Some(result) = result else {
            let error = on_cancel(candidate.clone());
            info!("Candidate {} cancelled: {}", candidate, error);
            return FallbackOutcome::Failed {
                candidate,
                error,
                class: FailureClass::Terminal,
                skipped,
            };
        };

        match result {
            Ok(value) => {
                return FallbackOutcome::Succeeded {
                    candidate,
                    value,
                    skipped,
                }
            }
            Err(error) => {
                let class = classify(&error);
                match (class, remaining.next()) {
                    (FailureClass::Retryable, Some(next)) => {
                        log_skip(&candidate, &error, &next);
                        skipped.push(SkippedAttempt { candidate, class });
                        candidate = next;
                    }
                    (class, _) => {
                        log_stop(&candidate, &error, class, skipped.len() + 1);
                        return FallbackOutcome::Failed {
                            candidate,
                            error,
                            class,
                            skipped,
                        };
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use std::sync::Mutex;
    use std::time::Duration;

    fn models(names: &[&'static str]) -> Candidates<&'static str> {
        Candidates::new(names.to_vec()).unwrap()
    }

    fn classify(error: &String) -> FailureClass {
        if error.starts_with("retry") {
            FailureClass::Retryable
        } else {
            FailureClass::Terminal
        }
    }

    #[test]
    fn empty_list_is_rejected() {
        assert!(Candidates::<&str>::new(Vec::new()).is_none());
        let list = models(&["a", "b"]);
        assert_eq!(list.len(), 2);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn success_after_retryable_failures_stops_there() {
        let calls = Mutex::new(Vec::new());
        let outcome = execute(models(&["m1", "m2", "m3", "m4"]), classify, |model| {
            calls.lock().unwrap().push(model);
            async move {
                if model == "m3" {
                    Ok("done")
                } else {
                    Err(format!("retry {model}"))
                }
            }
        })
        .await;

        assert_eq!(*calls.lock().unwrap(), vec!["m1", "m2", "m3"]);
        assert_eq!(outcome.attempts(), 3);
        assert_eq!(*outcome.candidate(), "m3");
        let skipped: Vec<_> = outcome.skipped().iter().map(|s| s.candidate).collect();
        assert_eq!(skipped, vec!["m1", "m2"]);
        assert_eq!(outcome.into_result(), Ok("done"));
    }

    #[tokio::test]
    async fn terminal_failure_tries_nothing_else() {
        let calls = Mutex::new(0);
        let outcome: FallbackOutcome<_, (), _> =
            execute(models(&["m1", "m2", "m3"]), classify, |_| {
                *calls.lock().unwrap() += 1;
                async { Err("bad key".to_string()) }
            })
            .await;

        assert_eq!(*calls.lock().unwrap(), 1);
        match outcome {
            FallbackOutcome::Failed {
                candidate,
                error,
                class,
                skipped,
            } => {
                assert_eq!(candidate, "m1");
                assert_eq!(error, "bad key");
                assert_eq!(class, FailureClass::Terminal);
                assert!(skipped.is_empty());
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn exhaustion_returns_the_last_error() {
        let calls = Mutex::new(Vec::new());
        let outcome: FallbackOutcome<_, (), _> =
            execute(models(&["m1", "m2", "m3"]), classify, |model| {
                calls.lock().unwrap().push(model);
                async move { Err(format!("retry {model}")) }
            })
            .await;

        assert_eq!(*calls.lock().unwrap(), vec!["m1", "m2", "m3"]);
        match outcome {
            FallbackOutcome::Failed {
                candidate,
                error,
                class,
                skipped,
            } => {
                assert_eq!(candidate, "m3");
                assert_eq!(error, "retry m3");
                assert_eq!(class, FailureClass::Retryable);
                assert_eq!(skipped.len(), 2);
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn single_candidate_behaves_like_a_direct_call() {
        let ok = execute(Candidates::single("only"), classify, |_| async {
            Ok::<_, String>(7)
        })
        .await;
        assert_eq!(ok.attempts(), 1);
        assert_eq!(ok.into_result(), Ok(7));

        let retry: FallbackOutcome<_, i32, _> =
            execute(Candidates::single("only"), classify, |_| async {
                Err("retry later".to_string())
            })
            .await;
        assert_eq!(retry.into_result(), Err("retry later".to_string()));
    }

    #[tokio::test]
    async fn provider_errors_fall_through_to_a_working_model() {
        let calls = Mutex::new(0);
        let outcome = execute(
            Candidates::new(vec!["m1".to_string(), "m2".to_string(), "m3".to_string()]).unwrap(),
            ProviderError::failure_class,
            |model| {
                *calls.lock().unwrap() += 1;
                async move {
                    match model.as_str() {
                        "m1" => Err(ProviderError::api(Some(429), None, "Rate limit exceeded")),
                        "m2" => Err(ProviderError::api(
                            Some(404),
                            None,
                            "No endpoints found for m2",
                        )),
                        _ => Ok("ok".to_string()),
                    }
                }
            },
        )
        .await;

        assert_eq!(*calls.lock().unwrap(), 3);
        assert_eq!(outcome.into_result(), Ok("ok".to_string()));
    }

    #[tokio::test]
    async fn cancellation_ends_the_run_as_terminal() {
        let calls = Mutex::new(0);
        let outcome: FallbackOutcome<_, (), _> = execute_until(
            models(&["slow", "never"]),
            classify,
            tokio::time::sleep(Duration::from_millis(20)),
            |model| format!("{model} timed out"),
            |_| {
                *calls.lock().unwrap() += 1;
                std::future::pending::<Result<(), String>>()
            },
        )
        .await;

        assert_eq!(*calls.lock().unwrap(), 1);
        match outcome {
            FallbackOutcome::Failed {
                candidate,
                error,
                class,
                ..
            } => {
                assert_eq!(candidate, "slow");
                assert_eq!(error, "slow timed out");
                assert_eq!(class, FailureClass::Terminal);
            }
            other => panic!("expected cancellation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn uncancelled_runs_match_execute() {
        let outcome = execute_until(
            models(&["m1", "m2"]),
            classify,
            tokio::time::sleep(Duration::from_secs(60)),
            |model| format!("{model} timed out"),
            |model| async move {
                if model == "m1" {
                    Err("retry m1".to_string())
                } else {
                    Ok(model)
                }
            },
        )
        .await;
        assert_eq!(outcome.attempts(), 2);
        assert_eq!(outcome.into_result(), Ok("m2"));
    }
}
