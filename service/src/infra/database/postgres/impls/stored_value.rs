//! [`StoredValue`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{plot, StoredValue, StoredValues},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<StoredValues, plot::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = StoredValues;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<StoredValues, plot::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let plot_id: plot::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, plot_id, key, value \
            FROM stored_values \
            WHERE plot_id = $1::UUID";
        Ok(self
            .query(SQL, &[&plot_id])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| StoredValue {
                id: row.get("id"),
                plot_id: row.get("plot_id"),
                key: row.get("key"),
                value: row.get("value"),
            })
            .collect())
    }
}

impl<C> Database<Insert<StoredValue>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(value): Insert<StoredValue>,
    ) -> Result<Self::Ok, Self::Err> {
        let StoredValue {
            id,
            plot_id,
            key,
            value,
        } = value;

        const SQL: &str = "\
            INSERT INTO stored_values (id, plot_id, key, value) \
            VALUES ($1::UUID, $2::UUID, $3::INT2, $4::NUMERIC) \
            ON CONFLICT (plot_id, key) DO UPDATE \
            SET value = EXCLUDED.value";
        self.exec(SQL, &[&id, &plot_id, &key, &value])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
