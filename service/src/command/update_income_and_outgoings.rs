//! [`Command`] for updating the income and outgoing records of a [`Plot`].

use common::{
    operations::{
        By, Commit, Delete, Insert, Lock, Select, Transact, Transacted,
    },
    Percent,
};
use derive_more::{Display, Error, From};
use rust_decimal::Decimal;
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{outgoing::Derived, User};
use crate::{
    domain::{
        audit, figure, outgoing, parking, plot,
        stored_value::{self, Key},
        user,
        valuation::Computation,
        Outgoing, Parking, Plot, StoredValue,
    },
    infra::{database, Database},
    read, Service,
};

use super::{sync_derived_outgoings::persist_derived, Command};

/// Changes of a collection of records submitted at once.
#[derive(Clone, Debug)]
pub struct Changes<Id, Draft> {
    /// Records to create.
    pub created: Vec<Draft>,

    /// Records to update, by their IDs.
    pub updated: Vec<(Id, Draft)>,

    /// IDs of the records to delete.
    pub deleted: Vec<Id>,
}

impl<Id, Draft> Default for Changes<Id, Draft> {
    fn default() -> Self {
        Self {
            created: Vec::new(),
            updated: Vec::new(),
            deleted: Vec::new(),
        }
    }
}

/// [`Command`] for applying the submitted income and outgoing records of a
/// [`Plot`], re-syncing its [`Derived`] [`Outgoing`]s afterwards.
///
/// Everything is applied in a single transaction, producing an
/// [`audit::Event`] per actual mutation.
#[derive(Clone, Debug)]
pub struct UpdateIncomeAndOutgoings {
    /// ID of the [`Plot`] to update.
    pub plot_id: plot::Id,

    /// ID of the [`User`] who submitted the changes.
    pub initiator_id: user::Id,

    /// [`Changes`] of the [`Parking`]s.
    pub parking: Changes<parking::Id, parking::Draft>,

    /// [`Changes`] of the [`Outgoing`]s.
    pub outgoings: Changes<outgoing::Id, outgoing::Draft>,

    /// New values of the [`StoredValue`]s.
    pub stored_values: Vec<(Key, Decimal)>,
}

impl<Db> Command<UpdateIncomeAndOutgoings> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Plot, plot::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<read::plot::Graph>, plot::Id>>,
            Ok = Option<read::plot::Graph>,
            Err = Traced<database::Error>,
        > + Database<Insert<Parking>, Err = Traced<database::Error>>
        + Database<
            Delete<By<Parking, parking::Id>>,
            Err = Traced<database::Error>,
        > + Database<Insert<Outgoing>, Err = Traced<database::Error>>
        + Database<
            Delete<By<Outgoing, outgoing::Id>>,
            Err = Traced<database::Error>,
        > + Database<Insert<StoredValue>, Err = Traced<database::Error>>
        + Database<Insert<audit::Event>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = read::plot::Valuated;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateIncomeAndOutgoings,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateIncomeAndOutgoings {
            plot_id,
            initiator_id,
            parking,
            outgoings,
            stored_values,
        } = cmd;

        for &(key, value) in &stored_values {
            let valid = figure::is_valid(value)
                && (!key.is_percentage() || Percent::new(value).is_some());
            if !valid {
                return Err(tracerr::new!(E::InvalidStoredValue(key)));
            }
        }
        let parking_drafts = parking
            .created
            .iter()
            .chain(parking.updated.iter().map(|(_, d)| d));
        for draft in parking_drafts {
            if !draft.is_valid() {
                return Err(tracerr::new!(E::InvalidParking(
                    draft.parking_type_id
                )));
            }
        }
        let outgoing_drafts = outgoings
            .created
            .iter()
            .chain(outgoings.updated.iter().map(|(_, d)| d));
        for draft in outgoing_drafts {
            if !draft.is_valid() {
                return Err(tracerr::new!(E::InvalidOutgoing(
                    draft.identifier.clone()
                )));
            }
        }
        if let Some(draft) = outgoings.created.iter().find(|d| {
            outgoing::Derived::of(&d.identifier).is_some()
        }) {
            return Err(tracerr::new!(E::DerivedOutgoingConflict(
                draft.identifier.clone()
            )));
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent modifications of the same `Plot`.
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

        for id in parking.deleted {
            let idx = graph
                .parking
                .iter()
                .position(|p| p.id == id)
                .ok_or(E::ParkingNotExists(id))
                .map_err(tracerr::wrap!())?;
            let before = graph.parking.remove(idx);
            tx.execute(Delete(By::<Parking, _>::new(id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
            record_event(&tx, audit::Event::deleted(initiator_id, &before))
                .await?;
        }
        for (id, draft) in parking.updated {
            let existing = graph
                .parking
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or(E::ParkingNotExists(id))
                .map_err(tracerr::wrap!())?;
            let after = draft.apply(id, plot_id);
            if *existing == after {
                continue;
            }
            let before = std::mem::replace(existing, after.clone());
            let event = audit::Event::updated(initiator_id, &before, &after);
            save(&tx, after, event).await?;
        }
        for draft in parking.created {
            let created = Parking::new(plot_id, draft);
            let event = audit::Event::created(initiator_id, &created);
            graph.parking.push(created.clone());
            save(&tx, created, event).await?;
        }

        for id in outgoings.deleted {
            let idx = graph
                .outgoings
                .iter()
                .position(|o| o.id == id)
                .ok_or(E::OutgoingNotExists(id))
                .map_err(tracerr::wrap!())?;
            let before = graph.outgoings.remove(idx);
            tx.execute(Delete(By::<Outgoing, _>::new(id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
            record_event(&tx, audit::Event::deleted(initiator_id, &before))
                .await?;
        }
        for (id, draft) in outgoings.updated {
            let existing = graph
                .outgoings
                .iter_mut()
                .find(|o| o.id == id)
                .ok_or(E::OutgoingNotExists(id))
                .map_err(tracerr::wrap!())?;
            let after = draft.apply(id, plot_id);
            if existing.derived() != after.derived() {
                return Err(tracerr::new!(E::DerivedOutgoingConflict(
                    after.identifier
                )));
            }
            if *existing == after {
                continue;
            }
            let before = std::mem::replace(existing, after.clone());
            let event = audit::Event::updated(initiator_id, &before, &after);
            save(&tx, after, event).await?;
        }
        for draft in outgoings.created {
            let created = Outgoing::new(plot_id, draft);
            let event = audit::Event::created(initiator_id, &created);
            graph.outgoings.push(created.clone());
            save(&tx, created, event).await?;
        }

        for (key, value) in stored_values {
            let (after, event) = match graph.stored_values.get(key) {
                Some(before) if before.value == value => continue,
                Some(before) => {
                    let after = StoredValue {
                        value,
                        ..before.clone()
                    };
                    let event =
                        audit::Event::updated(initiator_id, before, &after);
                    (after, event)
                }
                None => {
                    let after = StoredValue {
                        id: stored_value::Id::new(),
                        plot_id,
                        key,
                        value,
                    };
                    let event = audit::Event::created(initiator_id, &after);
                    (after, event)
                }
            };
            drop(graph.stored_values.set(after.clone()));
            save(&tx, after, event).await?;
        }

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

/// Inserts the provided `record` along with its audit [`audit::Event`].
async fn save<Tx, R>(
    tx: &Tx,
    record: R,
    event: audit::Event,
) -> Result<(), Traced<ExecutionError>>
where
    Tx: Database<Insert<R>, Err = Traced<database::Error>>
        + Database<Insert<audit::Event>, Err = Traced<database::Error>>,
{
    tx.execute(Insert(record))
        .await
        .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))
        .map(drop)?;
    record_event(tx, event).await
}

/// Inserts the provided audit [`audit::Event`].
async fn record_event<Tx>(
    tx: &Tx,
    event: audit::Event,
) -> Result<(), Traced<ExecutionError>>
where
    Tx: Database<Insert<audit::Event>, Err = Traced<database::Error>>,
{
    tx.execute(Insert(event))
        .await
        .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))
        .map(drop)
}

/// Error of [`UpdateIncomeAndOutgoings`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// User-edited [`Outgoing`] collides with a [`Derived`] one.
    #[display("`Outgoing` identifier `{_0}` is reserved for a derived row")]
    DerivedOutgoingConflict(#[error(not(source))] outgoing::Identifier),

    /// [`Outgoing`] figures are negative or out of their allowed range.
    #[display("`Outgoing` `{_0}` has figures out of range")]
    InvalidOutgoing(#[error(not(source))] outgoing::Identifier),

    /// [`Parking`] figures are negative or out of their allowed range.
    #[display("`Parking` of type `{_0}` has figures out of range")]
    InvalidParking(#[error(not(source))] parking::TypeId),

    /// [`StoredValue`] is out of its allowed range.
    #[display("`StoredValue` of `{_0}` is out of range")]
    InvalidStoredValue(#[error(not(source))] Key),

    /// [`Outgoing`] with the provided ID does not exist on the [`Plot`].
    #[display("`Outgoing(id: {_0})` does not exist")]
    OutgoingNotExists(#[error(not(source))] outgoing::Id),

    /// [`Parking`] with the provided ID does not exist on the [`Plot`].
    #[display("`Parking(id: {_0})` does not exist")]
    ParkingNotExists(#[error(not(source))] parking::Id),

    /// [`Plot`] with the provided ID does not exist.
    #[display("`Plot(id: {_0})` does not exist")]
    PlotNotExists(#[error(not(source))] plot::Id),
}
