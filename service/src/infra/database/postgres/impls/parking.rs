//! [`Parking`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{parking, plot, Parking},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Vec<Parking>, plot::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Parking>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Parking>, plot::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let plot_id: plot::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, plot_id, parking_type_id, \
                   unit_per_client, rate_per_client, \
                   unit_per_market, rate_per_market \
            FROM parking \
            WHERE plot_id = $1::UUID \
            ORDER BY seq ASC";
        Ok(self
            .query(SQL, &[&plot_id])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Parking {
                id: row.get("id"),
                plot_id: row.get("plot_id"),
                parking_type_id: row.get("parking_type_id"),
                unit_per_client: row.get("unit_per_client"),
                rate_per_client: row.get("rate_per_client"),
                unit_per_market: row.get("unit_per_market"),
                rate_per_market: row.get("rate_per_market"),
            })
            .collect())
    }
}

impl<C> Database<Insert<Parking>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(parking): Insert<Parking>,
    ) -> Result<Self::Ok, Self::Err> {
        let Parking {
            id,
            plot_id,
            parking_type_id,
            unit_per_client,
            rate_per_client,
            unit_per_market,
            rate_per_market,
        } = parking;

        const SQL: &str = "\
            INSERT INTO parking (\
                id, plot_id, parking_type_id, \
                unit_per_client, rate_per_client, \
                unit_per_market, rate_per_market \
            ) VALUES (\
                $1::UUID, $2::UUID, $3::INT4, \
                $4::NUMERIC, $5::NUMERIC, \
                $6::NUMERIC, $7::NUMERIC \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET parking_type_id = EXCLUDED.parking_type_id, \
                unit_per_client = EXCLUDED.unit_per_client, \
                rate_per_client = EXCLUDED.rate_per_client, \
                unit_per_market = EXCLUDED.unit_per_market, \
                rate_per_market = EXCLUDED.rate_per_market";
        self.exec(
            SQL,
            &[
                &id,
                &plot_id,
                &parking_type_id,
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

impl<C> Database<Delete<By<Parking, parking::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Parking, parking::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: parking::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM parking \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
