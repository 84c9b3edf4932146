//! [`Insurance`]-related [`Database`] implementations.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{plot, Insurance},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Vec<Insurance>, plot::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Insurance>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Insurance>, plot::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let plot_id: plot::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, plot_id, item, rate, area \
            FROM insurances \
            WHERE plot_id = $1::UUID \
            ORDER BY seq ASC";
        Ok(self
            .query(SQL, &[&plot_id])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Insurance {
                id: row.get("id"),
                plot_id: row.get("plot_id"),
                item: row.get("item"),
                rate: row.get("rate"),
                area: row.get("area"),
            })
            .collect())
    }
}
