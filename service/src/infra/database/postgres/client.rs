//! Postgres database clients.
//!
//! Both clients acquire their [`Connection`] from the [`connection::Pool`]
//! lazily, upon the first statement, so a [`Tx`] client that never touches
//! the database never opens a transaction.

use std::{future::Future, sync::Arc};

use tokio::sync::{RwLock, RwLockReadGuard};
use tokio_postgres::{types::ToSql, Row, ToStatement};
use tracerr::Traced;
use tracing as log;

use crate::infra::database::{
    self,
    postgres::{self, connection, Connection},
};

/// Lazily filled slot holding a [`Connection`] shared between clones of a
/// client.
#[derive(Debug)]
struct Slot<C>(Arc<RwLock<Option<C>>>);

impl<C> Clone for Slot<C> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<C> Default for Slot<C> {
    fn default() -> Self {
        Self(Arc::new(RwLock::new(None)))
    }
}

impl<C> Slot<C> {
    /// Returns the [`Connection`] held in this [`Slot`], filling it with the
    /// provided `init` first, if empty.
    async fn get_or_try_init<F, Fut>(
        &self,
        init: F,
    ) -> Result<RwLockReadGuard<'_, C>, Traced<database::Error>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<C, Traced<database::Error>>>,
    {
        let read = self.0.read().await;
        let guard = if read.is_some() {
            read
        } else {
            drop(read);

            let mut write = self.0.write().await;
            if write.is_none() {
                *write = Some(init().await.map_err(tracerr::wrap!())?);
            }
            write.downgrade()
        };

        // The slot was filled under the write lock still held by `guard`.
        RwLockReadGuard::try_map(guard, Option::as_ref)
            .map_err(|_| tracerr::new!(postgres::Error::ConnectionReleased))
            .map_err(tracerr::map_from)
    }

    /// Empties this [`Slot`], returning the [`Connection`] it held.
    async fn take(&self) -> Option<C> {
        self.0.write().await.take()
    }
}

/// Non-transactional Postgres database client.
#[derive(Clone, Debug)]
pub struct NonTx {
    /// [`connection::Pool`] to acquire [`Connection`]s from.
    pub(crate) pool: connection::Pool,

    /// [`Connection`] acquired by this client, if any.
    connection: Slot<connection::NonTx>,
}

impl NonTx {
    /// Creates a new [`NonTx`] client upon the provided [`connection::Pool`].
    #[must_use]
    pub(crate) fn from_pool(pool: connection::Pool) -> Self {
        Self {
            pool,
            connection: Slot::default(),
        }
    }

    /// Returns the [`Connection`] of this [`NonTx`] client, acquiring it
    /// from the [`connection::Pool`] if not yet.
    async fn connection(
        &self,
    ) -> Result<RwLockReadGuard<'_, connection::NonTx>, Traced<database::Error>>
    {
        self.connection
            .get_or_try_init(|| acquire(&self.pool))
            .await
    }
}

impl Connection for NonTx {
    async fn query<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Vec<Row>, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        let conn = self.connection().await.map_err(tracerr::wrap!())?;
        conn.query(stmt, params).await.map_err(tracerr::wrap!())
    }

    async fn query_opt<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Option<Row>, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        let conn = self.connection().await.map_err(tracerr::wrap!())?;
        conn.query_opt(stmt, params).await.map_err(tracerr::wrap!())
    }

    async fn exec<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<u64, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        let conn = self.connection().await.map_err(tracerr::wrap!())?;
        conn.exec(stmt, params).await.map_err(tracerr::wrap!())
    }
}

/// Transactional Postgres database client.
///
/// Its transaction is begun upon the first statement and rolled back if the
/// client is dropped without being [committed](Tx::commit).
#[derive(Clone, Debug)]
pub struct Tx {
    /// [`NonTx`] client this [`Tx`] client was started from.
    ///
    /// Its [`Connection`], if already acquired, is reused for the
    /// transaction.
    origin: Arc<RwLock<Option<NonTx>>>,

    /// Transaction begun by this client, if any.
    tx: Slot<connection::Tx>,
}

impl Tx {
    /// Creates a new [`Tx`] client out of the provided [`NonTx`] one.
    #[must_use]
    pub fn from_non_tx(client: NonTx) -> Self {
        Self {
            origin: Arc::new(RwLock::new(Some(client))),
            tx: Slot::default(),
        }
    }

    /// Returns the transaction of this [`Tx`] client, beginning it if not
    /// yet.
    async fn connection(
        &self,
    ) -> Result<RwLockReadGuard<'_, connection::Tx>, Traced<database::Error>>
    {
        self.tx.get_or_try_init(|| self.begin()).await
    }

    /// Begins a new transaction upon the [`Connection`] of the origin
    /// [`NonTx`] client, or upon a freshly acquired one.
    async fn begin(&self) -> Result<connection::Tx, Traced<database::Error>> {
        let origin = self.origin.write().await.take().ok_or_else(|| {
            tracerr::map_from(tracerr::new!(
                postgres::Error::ConnectionReleased
            ))
        })?;
        let conn = match origin.connection.take().await {
            Some(conn) => conn,
            None => acquire(&origin.pool).await.map_err(tracerr::wrap!())?,
        };
        log::debug!("beginning Postgres transaction");
        connection::Tx::begin(conn).await.map_err(tracerr::wrap!())
    }

    /// Commits the transaction of this [`Tx`] client, if it has been begun.
    ///
    /// # Errors
    ///
    /// If failed to commit the transaction.
    pub async fn commit(&self) -> Result<(), Traced<database::Error>> {
        let Some(tx) = self.tx.take().await else {
            log::debug!("nothing to commit, no statement was executed");
            return Ok(());
        };
        tx.commit().await.map_err(tracerr::wrap!())?;
        log::debug!("committed Postgres transaction");
        Ok(())
    }
}

impl Connection for Tx {
    async fn query<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Vec<Row>, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        let tx = self.connection().await.map_err(tracerr::wrap!())?;
        tx.query(stmt, params).await.map_err(tracerr::wrap!())
    }

    async fn query_opt<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Option<Row>, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        let tx = self.connection().await.map_err(tracerr::wrap!())?;
        tx.query_opt(stmt, params).await.map_err(tracerr::wrap!())
    }

    async fn exec<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<u64, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        let tx = self.connection().await.map_err(tracerr::wrap!())?;
        tx.exec(stmt, params).await.map_err(tracerr::wrap!())
    }
}

/// Acquires a new [`connection::NonTx`] from the provided
/// [`connection::Pool`].
pub(crate) async fn acquire(
    pool: &connection::Pool,
) -> Result<connection::NonTx, Traced<database::Error>> {
    pool.get()
        .await
        .map_err(tracerr::from_and_wrap!(=> postgres::Error))
        .map_err(tracerr::map_from)
}
