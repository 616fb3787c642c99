//! Property checks for the distance and selection primitives.

use proptest::prelude::*;

use trade_route_compare::domain::selection::ROUTE_OBJECTIVES;
use trade_route_compare::domain::{
    dominates, haversine_km, mark_recommended, pareto_front_indices, CongestionRisk, Route, WeightProfile,
};

fn coordinate() -> impl Strategy<Value = (f64, f64)> {
    (-89.0f64..89.0, -179.0f64..179.0)
}

fn objective_vector() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..1000.0, 5)
}

const CARRIERS: [&str; 4] = ["Maersk", "MSC", "DHL Aviation", "Regional Trucking"];

fn route_strategy() -> impl Strategy<Value = Route> {
    (
        1u32..60,
        100.0f64..50_000.0,
        0.0f64..20_000.0,
        0usize..3,
        0usize..CARRIERS.len(),
    )
        .prop_map(|(days, cost, emissions, risk, carrier)| Route {
            id: String::new(),
            name: "candidate".to_string(),
            carrier: CARRIERS[carrier].to_string(),
            transit_days: days,
            cost_usd: cost,
            emissions_kg_co2: emissions,
            congestion_risk: [CongestionRisk::Low, CongestionRisk::Medium, CongestionRisk::High][risk],
            recommended: false,
            savings: None,
            waypoints: Vec::new(),
        })
}

proptest! {
    #[test]
    fn haversine_is_symmetric_and_bounded(a in coordinate(), b in coordinate()) {
        let there = haversine_km(a.0, a.1, b.0, b.1);
        let back = haversine_km(b.0, b.1, a.0, a.1);
        prop_assert!((there - back).abs() < 1e-6);
        prop_assert!(there >= 0.0);
        // Half the circumference of a 6371 km sphere.
        prop_assert!(there <= 20_015.1);
        prop_assert!(haversine_km(a.0, a.1, a.0, a.1).abs() < 1e-9);
    }

    #[test]
    fn domination_is_irreflexive_and_asymmetric(a in objective_vector(), b in objective_vector()) {
        prop_assert!(!dominates(&a, &a));
        prop_assert!(!(dominates(&a, &b) && dominates(&b, &a)));
    }

    #[test]
    fn front_is_nonempty_and_undominated(items in prop::collection::vec(objective_vector(), 1..12)) {
        let objectives: Vec<Box<dyn Fn(&Vec<f64>) -> f64>> = (0..5)
            .map(|k| Box::new(move |item: &Vec<f64>| item[k]) as Box<dyn Fn(&Vec<f64>) -> f64>)
            .collect();
        let front = pareto_front_indices(&items, &objectives);
        prop_assert!(!front.is_empty());
        for &index in &front {
            prop_assert!(items.iter().all(|other| !dominates(other, &items[index])));
        }
        for index in 0..items.len() {
            if !front.contains(&index) {
                prop_assert!(items.iter().any(|other| dominates(other, &items[index])));
            }
        }
    }

    #[test]
    fn exactly_one_undominated_route_is_recommended(
        routes in prop::collection::vec(route_strategy(), 1..10),
        weights in prop::collection::vec(0.0f64..1.0, 5),
    ) {
        let mut routes = routes;
        for (index, route) in routes.iter_mut().enumerate() {
            route.id = format!("route_{index}");
        }
        let profile = WeightProfile::new(weights[0], weights[1], weights[2], weights[3], weights[4]);
        mark_recommended(&mut routes, &profile);

        let chosen: Vec<&Route> = routes.iter().filter(|route| route.recommended).collect();
        prop_assert_eq!(chosen.len(), 1);

        let values = |route: &Route| -> Vec<f64> { ROUTE_OBJECTIVES.iter().map(|f| f(route)).collect() };
        let best = values(chosen[0]);
        prop_assert!(routes.iter().all(|route| !dominates(&values(route), &best)));
    }
}
