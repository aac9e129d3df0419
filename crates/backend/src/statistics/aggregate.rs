use std::collections::{BTreeSet, HashMap};

use contracts::domain::orders::Order;
use contracts::statistics::{
    ChannelPartnerBucket, ChannelShareBucket, PartnerBucket, PeriodBucket, PeriodGranularity,
    RegionBucket, RegionPartnerBucket, StatisticsTotals,
};

use super::regions::normalize_region;

fn order_amount(order: &Order) -> i64 {
    order.order_price.unwrap_or(0)
}

fn order_settlement(order: &Order) -> i64 {
    order.rel_settlement_amount.unwrap_or(0)
}

fn order_commission(order: &Order) -> i64 {
    order.rel_commission_amount.unwrap_or(0)
}

/// Whole-filter totals: every dimension must conserve these.
pub fn totals(orders: &[Order]) -> StatisticsTotals {
    let mut acc = StatisticsTotals {
        orders: orders.len() as u64,
        ..StatisticsTotals::default()
    };
    for order in orders {
        acc.amount += order_amount(order);
        acc.settlement_amount += order_settlement(order);
        acc.commission_amount += order_commission(order);
    }
    acc
}

/// Groups by partner (company + team leader), collecting the set of
/// normalized regions each partner worked in. Sorted by amount descending;
/// ties keep first-encountered order (stable sort).
pub fn by_partner(orders: &[Order]) -> Vec<PartnerBucket> {
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    let mut buckets: Vec<PartnerBucket> = Vec::new();
    let mut regions: Vec<BTreeSet<String>> = Vec::new();

    for order in orders {
        let key = (
            order.partner_company().to_string(),
            order.partner_leader().to_string(),
        );
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            buckets.push(PartnerBucket {
                company: key.0,
                team_leader: key.1,
                regions: String::new(),
                count: 0,
                amount: 0,
                settlement_amount: 0,
                commission_amount: 0,
            });
            regions.push(BTreeSet::new());
            buckets.len() - 1
        });
        let bucket = &mut buckets[slot];
        bucket.count += 1;
        bucket.amount += order_amount(order);
        bucket.settlement_amount += order_settlement(order);
        bucket.commission_amount += order_commission(order);
        regions[slot].insert(normalize_region(order.address.as_deref()));
    }

    for (bucket, set) in buckets.iter_mut().zip(regions) {
        bucket.regions = set.into_iter().collect::<Vec<_>>().join(", ");
    }
    buckets.sort_by(|a, b| b.amount.cmp(&a.amount));
    buckets
}

/// Region-only rollup for the bar chart, sorted by count descending.
pub fn by_region(orders: &[Order]) -> Vec<RegionBucket> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<RegionBucket> = Vec::new();

    for order in orders {
        let region = normalize_region(order.address.as_deref());
        let slot = *index.entry(region.clone()).or_insert_with(|| {
            buckets.push(RegionBucket {
                region,
                count: 0,
                amount: 0,
            });
            buckets.len() - 1
        });
        buckets[slot].count += 1;
        buckets[slot].amount += order_amount(order);
    }

    buckets.sort_by(|a, b| b.count.cmp(&a.count));
    buckets
}

/// Region + partner rollup for the detail table: region ascending, then
/// amount descending within each region.
pub fn by_region_partner(orders: &[Order]) -> Vec<RegionPartnerBucket> {
    let mut index: HashMap<(String, String, String), usize> = HashMap::new();
    let mut buckets: Vec<RegionPartnerBucket> = Vec::new();

    for order in orders {
        let key = (
            normalize_region(order.address.as_deref()),
            order.partner_company().to_string(),
            order.partner_leader().to_string(),
        );
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            buckets.push(RegionPartnerBucket {
                region: key.0,
                company: key.1,
                team_leader: key.2,
                count: 0,
                amount: 0,
                settlement_amount: 0,
                commission_amount: 0,
            });
            buckets.len() - 1
        });
        let bucket = &mut buckets[slot];
        bucket.count += 1;
        bucket.amount += order_amount(order);
        bucket.settlement_amount += order_settlement(order);
        bucket.commission_amount += order_commission(order);
    }

    buckets.sort_by(|a, b| {
        a.region
            .cmp(&b.region)
            .then_with(|| b.amount.cmp(&a.amount))
    });
    buckets
}

/// Channel order share for the pie chart, sorted by count descending.
pub fn channel_share(orders: &[Order]) -> Vec<ChannelShareBucket> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<ChannelShareBucket> = Vec::new();

    for order in orders {
        let channel = order.channel_display().to_string();
        let slot = *index.entry(channel.clone()).or_insert_with(|| {
            buckets.push(ChannelShareBucket { channel, count: 0 });
            buckets.len() - 1
        });
        buckets[slot].count += 1;
    }

    buckets.sort_by(|a, b| b.count.cmp(&a.count));
    buckets
}

/// Channel + partner rollup for the detail table: channel ascending, then
/// amount descending.
pub fn by_channel_partner(orders: &[Order]) -> Vec<ChannelPartnerBucket> {
    let mut index: HashMap<(String, String, String), usize> = HashMap::new();
    let mut buckets: Vec<ChannelPartnerBucket> = Vec::new();

    for order in orders {
        let key = (
            order.channel_display().to_string(),
            order.partner_company().to_string(),
            order.partner_leader().to_string(),
        );
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            buckets.push(ChannelPartnerBucket {
                channel: key.0,
                company: key.1,
                team_leader: key.2,
                count: 0,
                amount: 0,
                settlement_amount: 0,
                commission_amount: 0,
            });
            buckets.len() - 1
        });
        let bucket = &mut buckets[slot];
        bucket.count += 1;
        bucket.amount += order_amount(order);
        bucket.settlement_amount += order_settlement(order);
        bucket.commission_amount += order_commission(order);
    }

    buckets.sort_by(|a, b| {
        a.channel
            .cmp(&b.channel)
            .then_with(|| b.amount.cmp(&a.amount))
    });
    buckets
}

/// Bucket key for the period dimension: the date part of `order_date`,
/// truncated to the month for monthly granularity.
fn period_key(order_date: &str, granularity: PeriodGranularity) -> String {
    let date_part = order_date.split('T').next().unwrap_or(order_date);
    match granularity {
        PeriodGranularity::Daily => date_part.to_string(),
        PeriodGranularity::Monthly => date_part.chars().take(7).collect(),
    }
}

/// Period rollup sorted chronologically ascending (chart order). Orders
/// without a date are skipped by this dimension.
pub fn by_period(orders: &[Order], granularity: PeriodGranularity) -> Vec<PeriodBucket> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<PeriodBucket> = Vec::new();

    for order in orders {
        let Some(order_date) = order.order_date.as_deref() else {
            continue;
        };
        let key = period_key(order_date, granularity);
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            buckets.push(PeriodBucket {
                period: key,
                count: 0,
                amount: 0,
                settlement_amount: 0,
                commission_amount: 0,
            });
            buckets.len() - 1
        });
        let bucket = &mut buckets[slot];
        bucket.count += 1;
        bucket.amount += order_amount(order);
        bucket.settlement_amount += order_settlement(order);
        bucket.commission_amount += order_commission(order);
    }

    buckets.sort_by(|a, b| a.period.cmp(&b.period));
    buckets
}

/// Re-aggregates daily buckets into monthly ones. Summation is
/// associative, so this equals aggregating the raw orders monthly.
pub fn rollup_monthly(daily: &[PeriodBucket]) -> Vec<PeriodBucket> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<PeriodBucket> = Vec::new();

    for day in daily {
        let key: String = day.period.chars().take(7).collect();
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            buckets.push(PeriodBucket {
                period: key,
                count: 0,
                amount: 0,
                settlement_amount: 0,
                commission_amount: 0,
            });
            buckets.len() - 1
        });
        let bucket = &mut buckets[slot];
        bucket.count += day.count;
        bucket.amount += day.amount;
        bucket.settlement_amount += day.settlement_amount;
        bucket.commission_amount += day.commission_amount;
    }

    buckets.sort_by(|a, b| a.period.cmp(&b.period));
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::UserRef;
    use contracts::domain::orders::ChannelRef;

    fn order(
        id: i64,
        company: Option<&str>,
        leader: &str,
        address: &str,
        channel: Option<&str>,
        date: &str,
        price: i64,
        settlement: i64,
        commission: i64,
    ) -> Order {
        Order {
            id,
            customer_name: None,
            phone: None,
            address: Some(address.to_string()),
            service_type: None,
            status: None,
            order_date: Some(format!("{}T10:00:00", date)),
            commission_type: None,
            order_price: Some(price),
            commission: None,
            rel_settlement_amount: Some(settlement),
            rel_commission_amount: Some(commission),
            partner: company.map(|c| UserRef {
                id: None,
                first_name: Some(c.to_string()),
                last_name: Some(leader.to_string()),
                email: None,
            }),
            channel_name: channel.map(|c| ChannelRef {
                id: None,
                channel_name: Some(c.to_string()),
            }),
            cstm_memo: None,
            memo: None,
            del_yn: None,
            user_created: None,
            user_updated: None,
            date_created: None,
            date_updated: None,
        }
    }

    fn sample() -> Vec<Order> {
        vec![
            order(1, Some("클린업"), "김팀장", "서울 강남구 역삼로", Some("네이버"), "2025-07-01", 100_000, 90_000, 10_000),
            order(2, Some("클린업"), "김팀장", "서울 송파구 올림픽로", Some("네이버"), "2025-07-02", 50_000, 45_000, 5_000),
            order(3, Some("홈마스터"), "박팀장", "경기도 성남시 분당구", Some("쿠팡"), "2025-07-02", 80_000, 72_000, 8_000),
            order(4, None, "", "부산 해운대구", None, "2025-08-01", 30_000, 27_000, 3_000),
        ]
    }

    #[test]
    fn test_partner_buckets() {
        let buckets = by_partner(&sample());
        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[0].company, "클린업");
        assert_eq!(buckets[0].count, 2);
        assert_eq!(buckets[0].amount, 150_000);
        assert_eq!(buckets[0].regions, "서울 강남구, 서울 송파구");
        // Missing partner resolves to the sentinel.
        assert!(buckets.iter().any(|b| b.company == "미지정"));
    }

    #[test]
    fn test_partner_sort_is_stable_on_ties() {
        let orders = vec![
            order(1, Some("가나"), "a", "서울 강남구", None, "2025-07-01", 10_000, 9_000, 1_000),
            order(2, Some("다라"), "b", "서울 강남구", None, "2025-07-01", 10_000, 9_000, 1_000),
            order(3, Some("마바"), "c", "서울 강남구", None, "2025-07-01", 20_000, 18_000, 2_000),
        ];
        let buckets = by_partner(&orders);
        assert_eq!(buckets[0].company, "마바");
        // Equal amounts keep input encounter order.
        assert_eq!(buckets[1].company, "가나");
        assert_eq!(buckets[2].company, "다라");
    }

    #[test]
    fn test_conservation_across_dimensions() {
        let orders = sample();
        let total = totals(&orders);
        assert_eq!(total.orders, 4);
        assert_eq!(total.amount, 260_000);

        let partner_count: u64 = by_partner(&orders).iter().map(|b| b.count).sum();
        let partner_amount: i64 = by_partner(&orders).iter().map(|b| b.amount).sum();
        assert_eq!(partner_count, total.orders);
        assert_eq!(partner_amount, total.amount);

        let region_count: u64 = by_region(&orders).iter().map(|b| b.count).sum();
        let region_amount: i64 = by_region(&orders).iter().map(|b| b.amount).sum();
        assert_eq!(region_count, total.orders);
        assert_eq!(region_amount, total.amount);

        let rp_count: u64 = by_region_partner(&orders).iter().map(|b| b.count).sum();
        assert_eq!(rp_count, total.orders);

        let share_count: u64 = channel_share(&orders).iter().map(|b| b.count).sum();
        assert_eq!(share_count, total.orders);

        let cp_amount: i64 = by_channel_partner(&orders).iter().map(|b| b.amount).sum();
        assert_eq!(cp_amount, total.amount);

        let period_count: u64 = by_period(&orders, PeriodGranularity::Daily)
            .iter()
            .map(|b| b.count)
            .sum();
        assert_eq!(period_count, total.orders);
    }

    #[test]
    fn test_region_partner_sort() {
        let buckets = by_region_partner(&sample());
        let regions: Vec<&str> = buckets.iter().map(|b| b.region.as_str()).collect();
        let mut sorted = regions.clone();
        sorted.sort();
        assert_eq!(regions, sorted);
    }

    #[test]
    fn test_channel_share() {
        let buckets = channel_share(&sample());
        assert_eq!(buckets[0].channel, "네이버");
        assert_eq!(buckets[0].count, 2);
        assert!(buckets.iter().any(|b| b.channel == "미지정"));
    }

    #[test]
    fn test_period_granularity() {
        let orders = sample();
        let daily = by_period(&orders, PeriodGranularity::Daily);
        assert_eq!(daily.len(), 3);
        assert_eq!(daily[0].period, "2025-07-01");
        assert_eq!(daily[1].period, "2025-07-02");
        assert_eq!(daily[1].count, 2);

        let monthly = by_period(&orders, PeriodGranularity::Monthly);
        assert_eq!(monthly.len(), 2);
        assert_eq!(monthly[0].period, "2025-07");
        assert_eq!(monthly[0].count, 3);
    }

    #[test]
    fn test_daily_rollup_matches_direct_monthly() {
        let orders = sample();
        let daily = by_period(&orders, PeriodGranularity::Daily);
        let rolled = rollup_monthly(&daily);
        let direct = by_period(&orders, PeriodGranularity::Monthly);
        assert_eq!(rolled, direct);
    }
}
