//! [`Outgoing`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{outgoing, plot, Outgoing},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Vec<Outgoing>, plot::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Outgoing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Outgoing>, plot::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let plot_id: plot::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, plot_id, identifier, item_type, \
                   unit_per_client, rate_per_client, \
                   unit_per_market, rate_per_market \
            FROM outgoings \
            WHERE plot_id = $1::UUID \
            ORDER BY seq ASC";
        Ok(self
            .query(SQL, &[&plot_id])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Outgoing {
                id: row.get("id"),
                plot_id: row.get("plot_id"),
                identifier: row.get("identifier"),
                item_type: row.get("item_type"),
                unit_per_client: row.get("unit_per_client"),
                rate_per_client: row.get("rate_per_client"),
                unit_per_market: row.get("unit_per_market"),
                rate_per_market: row.get("rate_per_market"),
            })
            .collect())
    }
}

impl<C> Database<Insert<Outgoing>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(outgoing): Insert<Outgoing>,
    ) -> Result<Self::Ok, Self::Err> {
        let Outgoing {
            id,
            plot_id,
            identifier,
            item_type,
            unit_per_client,
            rate_per_client,
            unit_per_market,
            rate_per_market,
        } = outgoing;

        const SQL: &str = "\
            INSERT INTO outgoings (\
                id, plot_id, identifier, item_type, \
                unit_per_client, rate_per_client, \
                unit_per_market, rate_per_market \
            ) VALUES (\
                $1::UUID, $2::UUID, $3::VARCHAR, $4::VARCHAR, \
                $5::NUMERIC, $6::NUMERIC, \
                $7::NUMERIC, $8::NUMERIC \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET identifier = EXCLUDED.identifier, \
                item_type = EXCLUDED.item_type, \
                unit_per_client = EXCLUDED.unit_per_client, \
                rate_per_client = EXCLUDED.rate_per_client, \
                unit_per_market = EXCLUDED.unit_per_market, \
                rate_per_market = EXCLUDED.rate_per_market";
        self.exec(
            SQL,
            &[
                &id,
                &plot_id,
                &identifier,
                &item_type,
                &unit_per_client,
                &rate_per_client,
                &unit_per_market,
                &rate_per_market,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<Outgoing, outgoing::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Outgoing, outgoing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: outgoing::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM outgoings \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
