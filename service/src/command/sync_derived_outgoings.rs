//! [`Command`] for syncing the [`Derived`] [`Outgoing`]s of a [`Plot`].

use common::operations::{
    By, Commit, Insert, Lock, Select, Transact, Transacted,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::{outgoing::Derived, User};
use crate::{
    domain::{
        audit, plot, user,
        valuation::{Computation, Upsert},
        Outgoing, Plot,
    },
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] for syncing the [`Derived`] [`Outgoing`]s of a [`Plot`] with
/// its computed figures, creating the missing ones.
///
/// Running it again upon unchanged records writes nothing.
#[derive(Clone, Copy, Debug)]
pub struct SyncDerivedOutgoings {
    /// ID of the [`Plot`] to sync.
    pub plot_id: plot::Id,

    /// ID of the [`User`] who triggered the sync.
    pub initiator_id: user::Id,
}

impl<Db> Command<SyncDerivedOutgoings> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Plot, plot::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<read::plot::Graph>, plot::Id>>,
            Ok = Option<read::plot::Graph>,
            Err = Traced<database::Error>,
        > + Database<Insert<Outgoing>, Err = Traced<database::Error>>
        + Database<Insert<audit::Event>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = read::plot::Valuated;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: SyncDerivedOutgoings,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SyncDerivedOutgoings {
            plot_id,
            initiator_id,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent creation of the same derived rows.
        tx.execute(Lock(By::new(plot_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut graph = tx
            .execute(Select(By::new(plot_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PlotNotExists(plot_id))
            .map_err(tracerr::wrap!())?;

        let Computation {
            valuation,
            outgoings,
            upserts,
        } = graph.compute();
        persist_derived(&tx, initiator_id, &upserts)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        graph.outgoings = outgoings;
        Ok(read::plot::Valuated { graph, valuation })
    }
}

/// Persists the provided [`Upsert`]s of the [`Derived`] [`Outgoing`]s, along
/// with their audit [`audit::Event`]s.
///
/// # Errors
///
/// If any of the writes fails.
pub(crate) async fn persist_derived<Tx>(
    tx: &Tx,
    initiator_id: user::Id,
    upserts: &[Upsert],
) -> Result<(), Traced<database::Error>>
where
    Tx: Database<Insert<Outgoing>, Err = Traced<database::Error>>
        + Database<Insert<audit::Event>, Err = Traced<database::Error>>,
{
    for upsert in upserts {
        let event = match upsert {
            Upsert::Create(after) => {
                log::debug!(
                    "creating derived `Outgoing(id: {})` `{}` of \
                     `Plot(id: {})`",
                    after.id,
                    after.identifier,
                    after.plot_id,
                );
                audit::Event::created(initiator_id, after)
            }
            Upsert::Update { before, after } => {
                log::debug!(
                    "updating derived `Outgoing(id: {})` `{}` of \
                     `Plot(id: {})`: {} -> {}",
                    after.id,
                    after.identifier,
                    after.plot_id,
                    before.unit_per_client,
                    after.unit_per_client,
                );
                audit::Event::updated(initiator_id, before, after)
            }
        };
        tx.execute(Insert(upsert.outgoing().clone()))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;
        tx.execute(Insert(event))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;
    }
    Ok(())
}

/// Error of [`SyncDerivedOutgoings`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Plot`] with the provided ID does not exist.
    #[display("`Plot(id: {_0})` does not exist")]
    PlotNotExists(#[error(not(source))] plot::Id),
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::{
        domain::{audit::Action, outgoing::ItemType, stored_value::Key},
        infra::database::mock::Mock,
        Config,
    };

    use super::*;

    #[tokio::test]
    async fn creates_derived_rows_once() {
        let db = Mock::default();
        let plot_id = db.seed_plot(dec!(500), dec!(20));
        db.seed_stored_value(plot_id, Key::VacancyPercentage, dec!(5));
        let svc = Service::new(Config::from_secret(b"secret"), db.clone());
        let cmd = SyncDerivedOutgoings {
            plot_id,
            initiator_id: user::Id::new(),
        };

        let first = svc.execute(cmd).await.unwrap();
        let writes = db.writes();
        let second = svc.execute(cmd).await.unwrap();

        assert_eq!(writes, 3);
        assert_eq!(db.writes(), writes);
        assert_eq!(db.locks(), [plot_id]);
        assert_eq!(db.outgoings(plot_id).len(), 3);
        assert!(db.events().iter().all(|e| {
            e.action == Action::Create && e.user_id == cmd.initiator_id
        }));
        assert_eq!(first.valuation, second.valuation);
        assert_eq!(
            first.valuation.management_fee.amount(),
            dec!(114000),
        );
        assert!(first
            .graph
            .outgoings
            .iter()
            .all(|o| o.item_type == ItemType::Percentage));
    }

    #[tokio::test]
    async fn updates_stale_row() {
        let db = Mock::default();
        let plot_id = db.seed_plot(dec!(100), dec!(10));
        let svc = Service::new(Config::from_secret(b"secret"), db.clone());
        let cmd = SyncDerivedOutgoings {
            plot_id,
            initiator_id: user::Id::new(),
        };
        drop(svc.execute(cmd).await.unwrap());

        db.seed_stored_value(plot_id, Key::VacancyPercentage, dec!(10));
        let synced = svc.execute(cmd).await.unwrap();

        assert_eq!(db.writes(), 4);
        let events = db.events();
        let last = events.last().unwrap();
        assert_eq!(last.action, Action::Update);
        let unit = |side: &str| {
            last.record_data[side]["unit_per_client"]
                .as_str()
                .unwrap()
                .parse::<Decimal>()
                .unwrap()
        };
        assert_eq!(unit("before"), dec!(12000));
        assert_eq!(unit("after"), dec!(10800));
        assert_eq!(synced.valuation.management_fee.amount(), dec!(10800));
    }

    #[tokio::test]
    async fn fails_on_unknown_plot() {
        let db = Mock::default();
        let svc = Service::new(Config::from_secret(b"secret"), db.clone());
        let plot_id = plot::Id::new();

        let err = svc
            .execute(SyncDerivedOutgoings {
                plot_id,
                initiator_id: user::Id::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::PlotNotExists(id) if *id == plot_id,
        ));
        assert_eq!(db.writes(), 0);
        assert!(db.locks().is_empty());
    }
}
