use super::*;
use shared::models::{
    CatalogMiscCharge, CatalogPart, LaborRate, Mechanic, PricingMode, PricingTier,
};

fn rule_set() -> PricingRuleSet {
    PricingRuleSet {
        mode: PricingMode::Margin,
        rules: vec![
            PricingTier::new(0.0, Some(100.0), 20.0),
            PricingTier::new(100.0, None, 15.0),
        ],
    }
}

fn rates() -> RateTable {
    RateTable::new(vec![
        LaborRate {
            code: "STD".to_string(),
            hourly_rate: 80.0,
        },
        LaborRate {
            code: "DIAG".to_string(),
            hourly_rate: 110.0,
        },
    ])
}

fn settings(shop_supply_percent: f64) -> WorkOrderSettings {
    WorkOrderSettings {
        shop_supply_percent,
        charge_for_cores_default: true,
    }
}

fn roster() -> Vec<Mechanic> {
    vec![
        Mechanic {
            id: "m1".to_string(),
            name: "Sam".to_string(),
            role: "mechanic".to_string(),
        },
        Mechanic {
            id: "m2".to_string(),
            name: "Alex".to_string(),
            role: "mechanic".to_string(),
        },
    ]
}

fn editor(shop_supply_percent: f64) -> WorkOrderEditor {
    WorkOrderEditor::new(
        rule_set(),
        rates(),
        settings(shop_supply_percent),
        roster(),
        Some("STD".to_string()),
    )
}

fn brake_pads() -> CatalogPart {
    CatalogPart {
        part_number: "BP-1044".to_string(),
        description: "Brake pad set".to_string(),
        average_cost: 50.0,
        ..Default::default()
    }
}

fn alternator() -> CatalogPart {
    CatalogPart {
        part_number: "ALT-220".to_string(),
        description: "Alternator".to_string(),
        average_cost: 120.0,
        core_has_charge: true,
        core_cost: 15.0,
        misc_has_charge: true,
        misc_charges: vec![CatalogMiscCharge {
            description: "Environmental fee".to_string(),
            price: 2.0,
        }],
        in_stock: 4.0,
    }
}

#[test]
fn test_new_editor_shape() {
    let editor = editor(5.0);
    assert_eq!(editor.blocks().len(), 1);
    // Customer default rate hint pre-fills the block
    assert_eq!(editor.blocks()[0].rate_code, "STD");
    // One trailing empty line as insertion point
    assert_eq!(editor.blocks()[0].parts.len(), 1);
    assert!(editor.blocks()[0].parts[0].is_empty());
    // Nothing computable yet
    assert_eq!(editor.totals().grand_total, None);
}

#[test]
fn test_labor_and_shop_supply() {
    let mut editor = editor(5.0);
    editor.set_labor_hours(0, Some(2.5)).unwrap();

    let totals = editor.totals();
    assert_eq!(totals.labor_total, Some(200.0));
    assert_eq!(totals.shop_supply_total, Some(10.0));
    assert_eq!(totals.grand_total, Some(210.0));
}

#[test]
fn test_labor_amount_reverse_derives_hours() {
    let mut editor = editor(0.0);
    editor.set_labor_amount(0, 200.0).unwrap();

    assert_eq!(editor.blocks()[0].hours, Some(2.5));
    assert_eq!(editor.labor_amount(0).unwrap(), Some(200.0));
    assert_eq!(editor.totals().labor_total, Some(200.0));
}

#[test]
fn test_labor_amount_requires_rate() {
    let mut editor = editor(0.0);
    editor.set_labor_rate_code(0, "").unwrap();

    let before = editor.totals().clone();
    let err = editor.set_labor_amount(0, 200.0).unwrap_err();
    assert_eq!(err.code, ErrorCode::RateRequired);
    // State preserved for correction
    assert_eq!(editor.blocks()[0].hours, None);
    assert_eq!(editor.totals(), &before);
}

#[test]
fn test_hours_and_amount_stay_in_sync() {
    let mut editor = editor(0.0);
    editor.set_labor_hours(0, Some(2.0)).unwrap();
    assert_eq!(editor.labor_amount(0).unwrap(), Some(160.0));

    editor.set_labor_amount(0, 240.0).unwrap();
    assert_eq!(editor.blocks()[0].hours, Some(3.0));

    // Changing the rate re-derives the dollar figure from hours
    editor.set_labor_rate_code(0, "DIAG").unwrap();
    assert_eq!(editor.labor_amount(0).unwrap(), Some(330.0));
}

#[test]
fn test_catalog_part_auto_pricing_margin() {
    let mut editor = editor(0.0);
    editor.apply_catalog_part(0, 0, &brake_pads()).unwrap();

    let line = &editor.blocks()[0].parts[0];
    // cost 50, margin 20% => 50 / 0.8 = 62.50
    assert_eq!(line.unit_price, Some(62.5));
    assert!(line.price_resolved);
    assert_eq!(line.quantity, Some(1.0));
    assert_eq!(editor.totals().parts_total, Some(62.5));
}

#[test]
fn test_markup_mode_pricing() {
    let mut editor = WorkOrderEditor::new(
        PricingRuleSet {
            mode: PricingMode::Markup,
            rules: vec![PricingTier::new(0.0, Some(100.0), 20.0)],
        },
        rates(),
        settings(0.0),
        vec![],
        None,
    );
    editor.apply_catalog_part(0, 0, &brake_pads()).unwrap();
    // cost 50, markup 20% => 50 * 1.2 = 60.00
    assert_eq!(editor.blocks()[0].parts[0].unit_price, Some(60.0));
}

#[test]
fn test_manual_price_never_overwritten() {
    let mut editor = editor(0.0);
    editor.apply_catalog_part(0, 0, &brake_pads()).unwrap();
    editor.set_part_price(0, 0, Some(70.0)).unwrap();

    // Any later edit triggers recompute; the override must survive
    editor.set_part_quantity(0, 0, Some(2.0)).unwrap();
    assert_eq!(editor.blocks()[0].parts[0].unit_price, Some(70.0));
    assert_eq!(editor.totals().parts_total, Some(140.0));
}

#[test]
fn test_clearing_price_reenables_autofill() {
    let mut editor = editor(0.0);
    editor.apply_catalog_part(0, 0, &brake_pads()).unwrap();
    editor.set_part_price(0, 0, Some(70.0)).unwrap();

    editor.set_part_price(0, 0, None).unwrap();
    // Recompute auto-fills once more from the unit cost
    assert_eq!(editor.blocks()[0].parts[0].unit_price, Some(62.5));
}

#[test]
fn test_auto_misc_rescales_manual_does_not() {
    let mut editor = editor(0.0);
    editor.apply_catalog_part(0, 0, &alternator()).unwrap();
    editor.add_manual_charge(0, "Disposal", 1.0, 5.0).unwrap();

    let groups = editor.misc_charge_groups(0).unwrap();
    let auto = groups
        .iter()
        .find(|g| g.description == "Environmental fee")
        .unwrap();
    assert_eq!(auto.amount, 2.0);

    // Quantity 1 -> 3: the auto charge rescales, the manual one doesn't
    editor.set_part_quantity(0, 0, Some(3.0)).unwrap();
    let groups = editor.misc_charge_groups(0).unwrap();
    let auto = groups
        .iter()
        .find(|g| g.description == "Environmental fee")
        .unwrap();
    let manual = groups.iter().find(|g| g.description == "Disposal").unwrap();
    assert_eq!(auto.amount, 6.0);
    assert_eq!(manual.amount, 5.0);
    assert_eq!(editor.totals().misc_total, 11.0);
}

#[test]
fn test_core_charge_in_parts_not_double_counted() {
    let mut editor = editor(0.0);
    editor.apply_catalog_part(0, 0, &alternator()).unwrap();
    editor.set_labor_hours(0, Some(1.0)).unwrap();

    let totals = editor.totals();
    // cost 120 => tier 15% margin => 120 / 0.85 = 141.18; +15 core
    assert_eq!(totals.parts_total, Some(156.18));
    assert_eq!(totals.core_total, 15.0);

    let expected = totals.labor_total.unwrap()
        + totals.parts_total.unwrap()
        + totals.misc_total
        + totals.shop_supply_total.unwrap();
    assert_eq!(totals.grand_total, Some(crate::money::to_f64(
        crate::money::round2(crate::money::to_decimal(expected)),
    )));
}

#[test]
fn test_trailing_empty_line_maintained() {
    let mut editor = editor(0.0);
    editor.apply_catalog_part(0, 0, &brake_pads()).unwrap();
    assert_eq!(editor.blocks()[0].parts.len(), 2);
    assert!(editor.blocks()[0].parts[1].is_empty());

    // Typing into the insertion point grows a new one
    editor.set_part_description(0, 1, "Shop rag").unwrap();
    assert_eq!(editor.blocks()[0].parts.len(), 3);
    assert!(editor.blocks()[0].parts[2].is_empty());
}

#[test]
fn test_cleared_line_removed() {
    let mut editor = editor(0.0);
    editor.apply_catalog_part(0, 0, &brake_pads()).unwrap();
    editor.set_part_description(0, 1, "Shop rag").unwrap();
    assert_eq!(editor.blocks()[0].parts.len(), 3);

    editor.set_part_description(0, 1, "").unwrap();
    assert_eq!(editor.blocks()[0].parts.len(), 2);
}

#[test]
fn test_remove_part_line_reindexes_auto_charges() {
    let mut editor = editor(0.0);
    editor.apply_catalog_part(0, 0, &brake_pads()).unwrap();
    editor.apply_catalog_part(0, 1, &alternator()).unwrap();

    editor.remove_part_line(0, 0).unwrap();
    let line = &editor.blocks()[0].parts[0];
    assert_eq!(line.part_number, "ALT-220");
    assert_eq!(line.misc_charges[0].source_line_index, Some(0));
}

#[test]
fn test_blocks_add_remove() {
    let mut editor = editor(0.0);
    let idx = editor.add_block();
    assert_eq!(idx, 1);
    assert_eq!(editor.blocks()[1].rate_code, "STD");

    editor.remove_block(1).unwrap();
    let err = editor.remove_block(0).unwrap_err();
    assert_eq!(err.code, ErrorCode::LastBlockNotRemovable);
}

#[test]
fn test_multi_block_grand_total() {
    let mut editor = editor(0.0);
    editor.set_labor_hours(0, Some(1.0)).unwrap();

    let second = editor.add_block();
    editor.set_labor_hours(second, Some(2.0)).unwrap();
    editor
        .apply_catalog_part(second, 0, &brake_pads())
        .unwrap();

    let totals = editor.totals();
    assert_eq!(totals.labor_total, Some(240.0));
    assert_eq!(totals.blocks[0].block_total, Some(80.0));
    assert_eq!(totals.blocks[1].block_total, Some(222.5));
    assert_eq!(totals.grand_total, Some(302.5));
}

#[test]
fn test_recompute_idempotent() {
    let mut editor = editor(5.0);
    editor.set_labor_hours(0, Some(2.5)).unwrap();
    editor.apply_catalog_part(0, 0, &alternator()).unwrap();

    let first = editor.totals().clone();
    // A no-op edit re-runs the whole chain
    editor.set_labor_hours(0, Some(2.5)).unwrap();
    assert_eq!(editor.totals(), &first);
}

#[test]
fn test_rejected_edit_preserves_totals() {
    let mut editor = editor(5.0);
    editor.set_labor_hours(0, Some(2.5)).unwrap();
    let before = editor.totals().clone();

    assert!(editor.set_part_quantity(0, 0, Some(-1.0)).is_err());
    assert!(editor.set_labor_hours(0, Some(f64::NAN)).is_err());
    assert_eq!(editor.totals(), &before);
}

#[test]
fn test_mechanic_assignment_and_save_validation() {
    let mut editor = editor(0.0);
    editor.assign_mechanic(0, "m1").unwrap();

    let err = editor.assign_mechanic(0, "m1").unwrap_err();
    assert_eq!(err.code, ErrorCode::MechanicAlreadyAssigned);
    let err = editor.assign_mechanic(0, "ghost").unwrap_err();
    assert_eq!(err.code, ErrorCode::MechanicNotFound);

    // Single split with unset percent normalizes to 100 at save
    editor.validate_for_save().unwrap();
    assert_eq!(editor.blocks()[0].assigned_mechanics[0].percent, Some(100.0));
}

#[test]
fn test_bad_split_blocks_save() {
    let mut editor = editor(0.0);
    editor.assign_mechanic(0, "m1").unwrap();
    editor.assign_mechanic(0, "m2").unwrap();
    editor.set_mechanic_percent(0, "m1", Some(60.0)).unwrap();
    editor.set_mechanic_percent(0, "m2", Some(39.0)).unwrap();

    let err = editor.validate_for_save().unwrap_err();
    assert_eq!(err.code, ErrorCode::SplitSumMismatch);
    // Never silently clamped
    assert_eq!(editor.blocks()[0].assigned_mechanics[1].percent, Some(39.0));

    editor.set_mechanic_percent(0, "m2", Some(40.0)).unwrap();
    editor.validate_for_save().unwrap();
}

#[test]
fn test_distribute_evenly_convenience() {
    let mut editor = editor(0.0);
    editor.assign_mechanic(0, "m1").unwrap();
    editor.assign_mechanic(0, "m2").unwrap();
    editor.distribute_splits_evenly(0).unwrap();

    let splits = &editor.blocks()[0].assigned_mechanics;
    assert_eq!(splits[0].percent, Some(50.0));
    assert_eq!(splits[1].percent, Some(50.0));
}

#[test]
fn test_restore_from_draft_recomputes() {
    let mut editor = editor(5.0);
    editor.set_labor_hours(0, Some(2.5)).unwrap();
    editor.apply_catalog_part(0, 0, &alternator()).unwrap();
    editor.set_part_quantity(0, 0, Some(2.0)).unwrap();
    let totals_before = editor.totals().clone();

    let draft = serializer::blocks_to_draft(editor.blocks());
    let restored =
        WorkOrderEditor::from_draft(rule_set(), rates(), settings(5.0), roster(), &draft);

    assert_eq!(restored.totals().grand_total, totals_before.grand_total);
    assert_eq!(restored.totals().misc_total, totals_before.misc_total);
    assert_eq!(restored.totals().core_total, totals_before.core_total);
}
