//! [`Plot`]-related [`Database`] implementations.

use common::operations::{By, Lock, Select};
use tracerr::Traced;

use crate::{
    domain::{
        plot, Insurance, Outgoing, Parking, Plot, StoredValues, Tenant,
    },
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

impl<C> Database<Select<By<Option<Plot>, plot::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Plot>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Plot>, plot::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: plot::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, \
                   undeveloped_portion, rate_for_undeveloped_portion, \
                   created_at \
            FROM plots \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Plot {
                id: row.get("id"),
                name: row.get("name"),
                undeveloped_portion: row.get("undeveloped_portion"),
                rate_for_undeveloped_portion: row
                    .get("rate_for_undeveloped_portion"),
                created_at: row.get("created_at"),
            }))
    }
}

impl<C> Database<Lock<By<Plot, plot::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Plot, plot::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: plot::Id = by.into_inner();

        // Updating the conflicting row locks it until the transaction ends.
        // Missing `Plot`s get no lock row.
        const SQL: &str = "\
            INSERT INTO plots_lock \
            SELECT id FROM plots WHERE id = $1::UUID \
            ON CONFLICT (id) DO UPDATE \
            SET id = EXCLUDED.id";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<Option<read::plot::Graph>, plot::Id>>>
    for Postgres<C>
where
    C: Connection,
    Self: Database<
            Select<By<Option<Plot>, plot::Id>>,
            Ok = Option<Plot>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Tenant>, plot::Id>>,
            Ok = Vec<Tenant>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Parking>, plot::Id>>,
            Ok = Vec<Parking>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Outgoing>, plot::Id>>,
            Ok = Vec<Outgoing>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Insurance>, plot::Id>>,
            Ok = Vec<Insurance>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<StoredValues, plot::Id>>,
            Ok = StoredValues,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Option<read::plot::Graph>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<read::plot::Graph>, plot::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let Some(plot) = self
            .execute(Select(By::<Option<Plot>, _>::new(id)))
            .await
            .map_err(tracerr::wrap!())?
        else {
            return Ok(None);
        };

        Ok(Some(read::plot::Graph {
            plot,
            tenants: self
                .execute(Select(By::<Vec<Tenant>, _>::new(id)))
                .await
                .map_err(tracerr::wrap!())?,
            parking: self
                .execute(Select(By::<Vec<Parking>, _>::new(id)))
                .await
                .map_err(tracerr::wrap!())?,
            outgoings: self
                .execute(Select(By::<Vec<Outgoing>, _>::new(id)))
                .await
                .map_err(tracerr::wrap!())?,
            insurances: self
                .execute(Select(By::<Vec<Insurance>, _>::new(id)))
                .await
                .map_err(tracerr::wrap!())?,
            stored_values: self
                .execute(Select(By::<StoredValues, _>::new(id)))
                .await
                .map_err(tracerr::wrap!())?,
        }))
    }
}
