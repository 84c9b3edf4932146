//! In-memory [`Database`] used in tests.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use common::{
    operations::{By, Commit, Delete, Insert, Lock, Select, Transact},
    DateTime,
};
use rust_decimal::Decimal;
use tracerr::Traced;

use crate::{
    domain::{
        audit, outgoing, parking, plot, property_type, stored_value, tenant,
        Outgoing, Parking, Plot, PropertyType, StoredValue, Tenant,
    },
    infra::{database, Database},
    read,
};

/// Records stored in a [`Mock`].
#[derive(Clone, Debug, Default)]
struct State {
    plots: Vec<Plot>,
    tenants: Vec<Tenant>,
    parking: Vec<Parking>,
    outgoings: Vec<Outgoing>,
    stored_values: Vec<StoredValue>,
    events: Vec<audit::Event>,
    locks: Vec<plot::Id>,
    writes: usize,
}

/// In-memory [`Database`].
///
/// [`Transact`] works on a copy of the records, which replaces the original
/// ones on [`Commit`] only.
#[derive(Clone, Debug, Default)]
pub(crate) struct Mock {
    state: Arc<Mutex<State>>,
    origin: Option<Arc<Mutex<State>>>,
}

impl Mock {
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seeds a new [`Plot`] with a single [`Tenant`] of the provided `area`
    /// let at the provided `rate`.
    pub(crate) fn seed_plot(&self, area: Decimal, rate: Decimal) -> plot::Id {
        let plot = Plot {
            id: plot::Id::new(),
            name: plot::Name::new("Seeded").unwrap(),
            undeveloped_portion: Decimal::ZERO,
            rate_for_undeveloped_portion: Decimal::ZERO,
            created_at: DateTime::now().coerce(),
        };
        let tenant = Tenant {
            id: tenant::Id::new(),
            plot_id: plot.id,
            name: "Seeded".into(),
            area_per_client: area,
            area_per_market: area,
            rate_per_client: rate,
            rate_per_market: rate,
            gross_monthly_rental: area * rate,
            property_type: PropertyType {
                id: property_type::Id::new(),
                identifier: "Retail".into(),
            },
            start_date: DateTime::now().coerce(),
            end_date: DateTime::now().coerce(),
        };
        let id = plot.id;
        let mut state = self.state();
        state.plots.push(plot);
        state.tenants.push(tenant);
        id
    }

    /// Seeds a [`StoredValue`], replacing the existing one.
    pub(crate) fn seed_stored_value(
        &self,
        plot_id: plot::Id,
        key: stored_value::Key,
        value: Decimal,
    ) {
        let mut state = self.state();
        state
            .stored_values
            .retain(|v| !(v.plot_id == plot_id && v.key == key));
        state.stored_values.push(StoredValue {
            id: stored_value::Id::new(),
            plot_id,
            key,
            value,
        });
    }

    /// Seeds a [`Parking`].
    pub(crate) fn seed_parking(&self, parking: Parking) {
        self.state().parking.push(parking);
    }

    /// Returns the number of committed record writes, audit events excluded.
    pub(crate) fn writes(&self) -> usize {
        self.state().writes
    }

    /// Returns all the committed [`audit::Event`]s.
    pub(crate) fn events(&self) -> Vec<audit::Event> {
        self.state().events.clone()
    }

    /// Returns the IDs of the [`Plot`]s having a committed lock row.
    pub(crate) fn locks(&self) -> Vec<plot::Id> {
        self.state().locks.clone()
    }

    /// Returns the committed [`Outgoing`]s of the provided [`Plot`].
    pub(crate) fn outgoings(&self, plot_id: plot::Id) -> Vec<Outgoing> {
        self.state()
            .outgoings
            .iter()
            .filter(|o| o.plot_id == plot_id)
            .cloned()
            .collect()
    }

    /// Returns the committed [`Parking`]s of the provided [`Plot`].
    pub(crate) fn parking(&self, plot_id: plot::Id) -> Vec<Parking> {
        self.state()
            .parking
            .iter()
            .filter(|p| p.plot_id == plot_id)
            .cloned()
            .collect()
    }

    /// Returns the committed [`StoredValue`]s of the provided [`Plot`].
    pub(crate) fn stored_values(&self, plot_id: plot::Id) -> Vec<StoredValue> {
        self.state()
            .stored_values
            .iter()
            .filter(|v| v.plot_id == plot_id)
            .cloned()
            .collect()
    }
}

impl Database<Transact> for Mock {
    type Ok = Self;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        Ok(Self {
            state: Arc::new(Mutex::new(self.state().clone())),
            origin: Some(Arc::clone(&self.state)),
        })
    }
}

impl Database<Commit> for Mock {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Commit) -> Result<Self::Ok, Self::Err> {
        if let Some(origin) = &self.origin {
            *origin.lock().unwrap_or_else(PoisonError::into_inner) =
                self.state().clone();
        }
        Ok(())
    }
}

impl Database<Lock<By<Plot, plot::Id>>> for Mock {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Plot, plot::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let mut state = self.state();
        if state.plots.iter().any(|p| p.id == id) && !state.locks.contains(&id)
        {
            state.locks.push(id);
        }
        Ok(())
    }
}

impl Database<Select<By<Option<Plot>, plot::Id>>> for Mock {
    type Ok = Option<Plot>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Plot>, plot::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.state().plots.iter().find(|p| p.id == id).cloned())
    }
}

impl Database<Select<By<Option<read::plot::Graph>, plot::Id>>> for Mock {
    type Ok = Option<read::plot::Graph>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<read::plot::Graph>, plot::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let state = self.state();
        let Some(plot) = state.plots.iter().find(|p| p.id == id).cloned()
        else {
            return Ok(None);
        };
        Ok(Some(read::plot::Graph {
            plot,
            tenants: of_plot(&state.tenants, id, |t| t.plot_id),
            parking: of_plot(&state.parking, id, |p| p.plot_id),
            outgoings: of_plot(&state.outgoings, id, |o| o.plot_id),
            insurances: Vec::new(),
            stored_values: of_plot(&state.stored_values, id, |v| v.plot_id)
                .into_iter()
                .collect(),
        }))
    }
}

/// Clones the `records` belonging to the provided [`Plot`].
fn of_plot<T: Clone>(
    records: &[T],
    plot_id: plot::Id,
    plot_of: impl Fn(&T) -> plot::Id,
) -> Vec<T> {
    records
        .iter()
        .filter(|r| plot_of(r) == plot_id)
        .cloned()
        .collect()
}

/// Replaces the record with the same ID, or appends a new one.
fn upsert<T, Id: PartialEq>(
    records: &mut Vec<T>,
    record: T,
    id: impl Fn(&T) -> Id,
) {
    match records.iter().position(|r| id(r) == id(&record)) {
        Some(idx) => records[idx] = record,
        None => records.push(record),
    }
}

impl Database<Insert<Parking>> for Mock {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(parking): Insert<Parking>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.state();
        upsert(&mut state.parking, parking, |p| p.id);
        state.writes += 1;
        Ok(())
    }
}

impl Database<Delete<By<Parking, parking::Id>>> for Mock {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Parking, parking::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let mut state = self.state();
        state.parking.retain(|p| p.id != id);
        state.writes += 1;
        Ok(())
    }
}

impl Database<Insert<Outgoing>> for Mock {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(outgoing): Insert<Outgoing>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.state();
        upsert(&mut state.outgoings, outgoing, |o| o.id);
        state.writes += 1;
        Ok(())
    }
}

impl Database<Delete<By<Outgoing, outgoing::Id>>> for Mock {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Outgoing, outgoing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let mut state = self.state();
        state.outgoings.retain(|o| o.id != id);
        state.writes += 1;
        Ok(())
    }
}

impl Database<Insert<StoredValue>> for Mock {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(value): Insert<StoredValue>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.state();
        upsert(&mut state.stored_values, value, |v| (v.plot_id, v.key));
        state.writes += 1;
        Ok(())
    }
}

impl Database<Insert<audit::Event>> for Mock {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(event): Insert<audit::Event>,
    ) -> Result<Self::Ok, Self::Err> {
        self.state().events.push(event);
        Ok(())
    }
}
