//! Grouping of [`Tenant`]s by their asset type.

use common::{money, Money};
use rust_decimal::Decimal;

use crate::domain::{property_type, Tenant};

/// Tenancies of a single asset type summed up.
#[derive(Clone, Debug, PartialEq)]
pub struct AssetTypeGroup {
    /// Asset type of this [`AssetTypeGroup`].
    pub property_type: property_type::Identifier,

    /// Let area of this [`AssetTypeGroup`].
    pub area: Decimal,

    /// Monthly gross income of this [`AssetTypeGroup`].
    pub gross_income: Money,

    /// Number of [`Tenant`]s in this [`AssetTypeGroup`].
    pub count: usize,

    /// Gross income per let area unit.
    pub blended_rate: Money,

    /// Share of the total let area, as a fraction of one.
    pub gla_percent: Decimal,
}

impl AssetTypeGroup {
    /// Creates a new empty [`AssetTypeGroup`] of the provided asset type.
    fn empty(property_type: property_type::Identifier) -> Self {
        Self {
            property_type,
            area: Decimal::ZERO,
            gross_income: Money::ZERO,
            count: 0,
            blended_rate: Money::ZERO,
            gla_percent: Decimal::ZERO,
        }
    }

    /// Adds the provided [`Tenant`] to this [`AssetTypeGroup`], recomputing
    /// its ratios out of the running totals.
    fn add(&mut self, tenant: &Tenant, total_area: Decimal) {
        self.area += tenant.area_per_client;
        self.gross_income =
            self.gross_income + Money::new(tenant.gross_income());
        self.count += 1;

        self.blended_rate = if self.area > Decimal::ZERO {
            Money::new(self.gross_income.amount() / self.area)
        } else {
            Money::ZERO
        };
        self.gla_percent = if total_area > Decimal::ZERO {
            money::round(self.area / total_area, 4)
        } else {
            Decimal::ZERO
        };
    }
}

/// Groups the provided [`Tenant`]s by their asset type, in the order of their
/// first appearance.
#[must_use]
pub fn group_by_asset_type(
    tenants: &[Tenant],
    total_area: Decimal,
) -> Vec<AssetTypeGroup> {
    tenants.iter().fold(Vec::new(), |mut groups, tenant| {
        let identifier = &tenant.property_type.identifier;
        let idx = groups
            .iter()
            .position(|g: &AssetTypeGroup| &g.property_type == identifier)
            .unwrap_or_else(|| {
                groups.push(AssetTypeGroup::empty(identifier.clone()));
                groups.len() - 1
            });
        groups[idx].add(tenant, total_area);
        groups
    })
}

#[cfg(test)]
mod spec {
    use common::DateTime;
    use rust_decimal_macros::dec;

    use crate::domain::{plot, tenant, PropertyType};

    use super::{super::aggregate::total_area, *};

    fn tenant(property_type: &str, area: Decimal, rate: Decimal) -> Tenant {
        Tenant {
            id: tenant::Id::new(),
            plot_id: plot::Id::default(),
            name: "Tenant".into(),
            area_per_client: area,
            area_per_market: area,
            rate_per_client: rate,
            rate_per_market: rate,
            gross_monthly_rental: Decimal::ZERO,
            property_type: PropertyType {
                id: property_type::Id::default(),
                identifier: property_type.into(),
            },
            start_date: DateTime::now().coerce(),
            end_date: DateTime::now().coerce(),
        }
    }

    #[test]
    fn groups_in_first_appearance_order() {
        let tenants = [
            tenant("Retail", dec!(100), dec!(10)),
            tenant("Office", dec!(300), dec!(5)),
            tenant("Retail", dec!(100), dec!(20)),
        ];

        let groups = group_by_asset_type(&tenants, dec!(500));

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].property_type, "Retail".into());
        assert_eq!(groups[0].count, 2);
        assert_eq!(groups[0].area, dec!(200));
        assert_eq!(groups[0].gross_income, Money::new(dec!(3000)));
        assert_eq!(groups[0].blended_rate, Money::new(dec!(15)));
        assert_eq!(groups[0].gla_percent, dec!(0.4));
        assert_eq!(groups[1].property_type, "Office".into());
        assert_eq!(groups[1].blended_rate, Money::new(dec!(5)));
        assert_eq!(groups[1].gla_percent, dec!(0.6));
    }

    #[test]
    fn conserves_area() {
        let tenants = [
            tenant("Retail", dec!(12.5), dec!(10)),
            tenant("Office", dec!(30.25), dec!(5)),
            tenant("Storage", dec!(7), dec!(1)),
            tenant("Retail", dec!(0.75), dec!(20)),
            tenant("Office", dec!(1), dec!(3)),
        ];
        let total = total_area(&tenants).client;

        let grouped = group_by_asset_type(&tenants, total)
            .iter()
            .map(|g| g.area)
            .sum::<Decimal>();

        assert_eq!(grouped, total);
        assert_eq!(grouped, dec!(51.5));
    }

    #[test]
    fn guards_zero_areas() {
        let tenants = [tenant("Kiosk", Decimal::ZERO, dec!(10))];

        let groups = group_by_asset_type(&tenants, Decimal::ZERO);

        assert_eq!(groups[0].blended_rate, Money::ZERO);
        assert_eq!(groups[0].gla_percent, Decimal::ZERO);
    }
}
