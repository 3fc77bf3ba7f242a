use super::DbPool;
use crate::errors::{IntoCore, StorageError};
use diesel::SqliteConnection;
use log::debug;
use pitchdesk_core::errors::{DatabaseError, Error, Result};
use std::any::Any;
use tokio::sync::{mpsc, oneshot};

// A write job runs against the actor's connection and reports a core result.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;
type Erased = Box<dyn Any + Send + 'static>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(Job<Erased>, oneshot::Sender<Result<Erased>>)>,
}

fn writer_gone() -> Error {
    Error::Database(DatabaseError::Internal(
        "database writer is no longer running".to_string(),
    ))
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection,
    /// inside an immediate transaction. An error from the job rolls the
    /// transaction back and is returned unchanged.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Erased)),
                ret_tx,
            ))
            .await
            .map_err(|_| writer_gone())?;

        let boxed = ret_rx.await.map_err(|_| writer_gone())??;
        boxed.downcast::<T>().map(|v| *v).map_err(|_| {
            Error::Database(DatabaseError::Internal(
                "unexpected result type from database writer".to_string(),
            ))
        })
    }
}

/// Spawns a background Tokio task that acts as the single writer to the database.
/// The actor owns one pooled connection and processes write jobs serially.
pub fn spawn_writer(pool: DbPool) -> Result<WriteHandle> {
    let mut conn = pool.get().into_core()?;
    let (tx, mut rx) = mpsc::channel::<(Job<Erased>, oneshot::Sender<Result<Erased>>)>(1024);

    tokio::spawn(async move {
        while let Some((job, reply_tx)) = rx.recv().await {
            let result: Result<Erased> = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(Error::from);

            // The requester may have gone away (timeout, cancelled request).
            let _ = reply_tx.send(result);
        }
        debug!("Database writer stopped");
    });

    Ok(WriteHandle { tx })
}
