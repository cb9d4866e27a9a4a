//! Greedy construction of the stop sequence.

use hauler_config::PlannerConfig;
use hauler_core::Scu;
use hauler_universe::{LocationGraph, LocationId};

use super::actions::{ActionSet, Site, same_system};
use super::{RouteCompletion, RouteItem, RouteStop, StopKind};

/// Stops emitted by the constructor and whether every obligation was visited.
pub(crate) struct Construction {
    pub stops: Vec<RouteStop>,
    pub completion: RouteCompletion,
}

/// Pickups and ready deliveries sharing one site.
struct Bucket {
    site: usize,
    pickups: Vec<usize>,
    deliveries: Vec<usize>,
}

impl Bucket {
    fn pickup_scu(&self, actions: &ActionSet) -> Scu {
        self.pickups.iter().map(|&p| actions.pickups[p].scu()).sum()
    }

    fn delivery_scu(&self, actions: &ActionSet) -> Scu {
        self.deliveries
            .iter()
            .map(|&d| actions.deliveries[d].scu())
            .sum()
    }
}

struct Constructor<'a> {
    graph: &'a LocationGraph,
    config: &'a PlannerConfig,
    actions: &'a ActionSet,
    pending_pickups: Vec<bool>,
    pending_deliveries: Vec<bool>,
    on_board: Vec<bool>,
    current: Option<usize>,
    stops: Vec<RouteStop>,
}

pub(crate) fn construct(
    graph: &LocationGraph,
    config: &PlannerConfig,
    actions: &ActionSet,
) -> Construction {
    let mut constructor = Constructor {
        graph,
        config,
        actions,
        pending_pickups: vec![true; actions.pickups.len()],
        pending_deliveries: vec![true; actions.deliveries.len()],
        on_board: vec![false; actions.pickups.len()],
        current: None,
        stops: Vec::new(),
    };
    let completion = constructor.run();
    Construction {
        stops: constructor.stops,
        completion,
    }
}

impl Constructor<'_> {
    fn run(&mut self) -> RouteCompletion {
        while self.has_pending() {
            let buckets = self.buckets();
            if buckets.is_empty() {
                let completion = self.incomplete();
                log::warn!(
                    "route generation stopped with obligations left: {}",
                    completion
                );
                return completion;
            }

            let destinations = self.pending_destinations();
            let gateways = self.relevant_gateways();

            let mut best: Option<(usize, f64)> = None;
            for (index, bucket) in buckets.iter().enumerate() {
                let score = self.score(bucket, &destinations, &gateways);
                log::trace!(
                    "candidate {} scores {score:.2}",
                    self.actions.sites.get(bucket.site).display
                );
                // Strictly greater keeps the first bucket on ties.
                if best.is_none_or(|(_, top)| score > top) {
                    best = Some((index, score));
                }
            }
            let Some((chosen, score)) = best else {
                break;
            };
            let bucket = &buckets[chosen];
            log::debug!(
                "stop at {} (score {score:.2}, {} deliveries, {} pickups)",
                self.actions.sites.get(bucket.site).display,
                bucket.deliveries.len(),
                bucket.pickups.len()
            );
            self.visit(bucket);
        }
        RouteCompletion::Complete
    }

    fn has_pending(&self) -> bool {
        self.pending_pickups.iter().any(|&p| p) || self.pending_deliveries.iter().any(|&d| d)
    }

    /// Candidate buckets: pending pickups first, then on-board deliveries, in extraction order.
    fn buckets(&self) -> Vec<Bucket> {
        let mut slots: Vec<Option<usize>> = vec![None; self.actions.sites.len()];
        let mut buckets: Vec<Bucket> = Vec::new();
        let mut bucket_for = |site: usize, buckets: &mut Vec<Bucket>| -> usize {
            *slots[site].get_or_insert_with(|| {
                buckets.push(Bucket {
                    site,
                    pickups: Vec::new(),
                    deliveries: Vec::new(),
                });
                buckets.len() - 1
            })
        };

        for (index, pickup) in self.actions.pickups.iter().enumerate() {
            if self.pending_pickups[index] {
                let slot = bucket_for(pickup.site, &mut buckets);
                buckets[slot].pickups.push(index);
            }
        }
        for (index, delivery) in self.actions.deliveries.iter().enumerate() {
            if self.pending_deliveries[index] && self.on_board[delivery.pickup] {
                let slot = bucket_for(delivery.site, &mut buckets);
                buckets[slot].deliveries.push(index);
            }
        }
        buckets
    }

    /// Distinct sites of every pending delivery, ready or not.
    fn pending_destinations(&self) -> Vec<usize> {
        let mut sites: Vec<usize> = Vec::new();
        for (index, delivery) in self.actions.deliveries.iter().enumerate() {
            if self.pending_deliveries[index] && !sites.contains(&delivery.site) {
                sites.push(delivery.site);
            }
        }
        sites
    }

    /// Gateways toward foreign systems that still expect deliveries.
    fn relevant_gateways(&self) -> Vec<LocationId> {
        let mut gateways = Vec::new();
        for foreign in &self.actions.foreign_systems {
            let Some(gateway) = foreign.gateway else {
                continue;
            };
            let pending = self
                .actions
                .deliveries
                .iter()
                .enumerate()
                .filter(|(index, _)| self.pending_deliveries[*index])
                .filter_map(|(_, delivery)| self.actions.sites.location(delivery.site))
                .any(|id| self.graph.system_of(id) == Some(foreign.system));
            if pending && !gateways.contains(&gateway) {
                gateways.push(gateway);
            }
        }
        gateways
    }

    fn cost(&self, a: usize, b: usize) -> f64 {
        self.graph
            .travel_cost(self.actions.sites.location(a), self.actions.sites.location(b))
    }

    fn cost_to(&self, site: usize, target: LocationId) -> f64 {
        self.graph
            .travel_cost(self.actions.sites.location(site), Some(target))
    }

    fn score(&self, bucket: &Bucket, destinations: &[usize], gateways: &[LocationId]) -> f64 {
        let delivery_scu = bucket.delivery_scu(self.actions);
        let pickup_scu = bucket.pickup_scu(self.actions);
        let site = bucket.site;

        let mut score = self.config.delivery_weight * f64::from(delivery_scu)
            + self.config.pickup_weight * f64::from(pickup_scu);
        if delivery_scu > 0 && pickup_scu > 0 {
            score += self.config.combo_bonus;
        }
        if let Some(current) = self.current {
            score -= self.config.distance_penalty * self.cost(current, site);
        }

        let nearby: Vec<usize> = destinations
            .iter()
            .copied()
            .filter(|&d| d != site && self.actions.same_system(self.graph, site, d))
            .collect();

        score -= self.config.lookahead_weight * self.lookahead(site, &nearby, gateways);
        score -= self.config.gateway_weight * self.gateway_deviation(site, &nearby, gateways);
        score
    }

    /// Mean cost from `site` to the nearby destinations and relevant gateways.
    fn lookahead(&self, site: usize, nearby: &[usize], gateways: &[LocationId]) -> f64 {
        let mut total = 0.0;
        let mut count = 0usize;
        let mut seen: Vec<LocationId> = self.actions.sites.location(site).into_iter().collect();
        for &destination in nearby {
            seen.extend(self.actions.sites.location(destination));
            total += self.cost(site, destination);
            count += 1;
        }
        for &gateway in gateways {
            if seen.contains(&gateway) {
                continue;
            }
            seen.push(gateway);
            total += self.cost_to(site, gateway);
            count += 1;
        }
        if count == 0 { 0.0 } else { total / count as f64 }
    }

    /// Unweighted detour through nearby destinations relative to heading straight for the gateway.
    fn gateway_deviation(&self, site: usize, nearby: &[usize], gateways: &[LocationId]) -> f64 {
        let Some(&gateway) = gateways.first() else {
            return 0.0;
        };
        let Some(start) = self.actions.start_system else {
            return 0.0;
        };
        if !same_system(self.graph, self.actions.sites.location(site), Some(start)) {
            return 0.0;
        }

        let direct = self.cost_to(site, gateway);
        nearby
            .iter()
            .map(|&d| (self.cost(site, d) + self.cost_to(d, gateway) - direct).max(0.0))
            .sum()
    }

    fn visit(&mut self, bucket: &Bucket) {
        let display = self.actions.sites.get(bucket.site).display.clone();
        let site = self.actions.sites.get(bucket.site).site.clone();

        if !bucket.deliveries.is_empty() {
            let items = bucket
                .deliveries
                .iter()
                .map(|&d| self.actions.deliveries[d].item.clone())
                .collect();
            for &d in &bucket.deliveries {
                self.pending_deliveries[d] = false;
                self.on_board[self.actions.deliveries[d].pickup] = false;
            }
            self.push_stop(StopKind::Delivery, &display, &site, items);
        }

        if !bucket.pickups.is_empty() {
            let items = bucket
                .pickups
                .iter()
                .map(|&p| self.actions.pickups[p].item.clone())
                .collect();
            for &p in &bucket.pickups {
                self.pending_pickups[p] = false;
                self.on_board[p] = true;
            }
            self.push_stop(StopKind::Pickup, &display, &site, items);
        }

        self.current = Some(bucket.site);
    }

    fn push_stop(
        &mut self,
        kind: StopKind,
        display: &str,
        site: &Site,
        items: Vec<RouteItem>,
    ) {
        self.stops.push(RouteStop {
            id: format!("stop_{}", self.stops.len() + 1),
            kind,
            location: display.to_string(),
            site: site.clone(),
            items,
        });
    }

    fn incomplete(&self) -> RouteCompletion {
        let pending_pickups = self
            .actions
            .pickups
            .iter()
            .enumerate()
            .filter(|(index, _)| self.pending_pickups[*index])
            .map(|(_, pickup)| pickup.id.clone())
            .collect();
        let pending_deliveries = self
            .actions
            .deliveries
            .iter()
            .enumerate()
            .filter(|(index, _)| self.pending_deliveries[*index])
            .map(|(_, delivery)| delivery.id.clone())
            .collect();
        RouteCompletion::Incomplete {
            pending_pickups,
            pending_deliveries,
        }
    }
}
