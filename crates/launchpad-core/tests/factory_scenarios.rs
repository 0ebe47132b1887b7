//! # Factory Scenarios
//!
//! End-to-end lifecycle: deploy, create, buy, close, deposit, withdraw.

use launchpad_core::*;

const AMOUNT: u128 = 10_000 * SCALE;

struct Deployed {
    registry: SaleRegistry,
    deployer: Pubkey,
    creator: Pubkey,
    buyer: Pubkey,
    token: Pubkey,
}

fn units(text: &str) -> u128 {
    parse_units(text, DECIMALS).unwrap()
}

/// Registry with fee 0.01 and one sale created by `creator`
fn deploy_factory() -> Deployed {
    let deployer = Pubkey::new_unique();
    let creator = Pubkey::new_unique();
    let buyer = Pubkey::new_unique();

    let mut registry = SaleRegistry::new(deployer, Pubkey::new_unique(), RegistryConfig::default()).unwrap();
    let sale_id = registry.create(&creator, "DAPP Uni", "DAPP", units("0.01")).unwrap();
    let token = registry.get_sale(sale_id).unwrap().token;

    Deployed { registry, deployer, creator, buyer, token }
}

/// Same as `deploy_factory` plus one purchase of 10,000 tokens for 1.0
fn buy_token() -> Deployed {
    let mut deployed = deploy_factory();
    let buyer = deployed.buyer;
    deployed.registry.buy(&buyer, 0, AMOUNT, units("1")).unwrap();
    deployed
}

// ============================================
// Deployment
// ============================================

#[test]
fn test_sets_fee_and_owner() {
    let d = deploy_factory();
    assert_eq!(d.registry.fee(), units("0.01"));
    assert_eq!(d.registry.owner(), &d.deployer);
    assert_eq!(d.registry.target(), units("3"));
    assert_eq!(d.registry.token_limit(), units("500000"));
}

// ============================================
// Creating
// ============================================

#[test]
fn test_create_mints_supply_to_registry() {
    let d = deploy_factory();
    let ledger = d.registry.ledger(0).unwrap();
    assert_eq!(ledger.custodian, *d.registry.registry_id());
    assert_eq!(ledger.balance_of(d.registry.registry_id()), units("1000000"));
    assert_eq!(ledger.total_supply(), units("1000000"));
    assert_eq!(ledger.name, "DAPP Uni");
    assert_eq!(ledger.ticker, "DAPP");
}

#[test]
fn test_create_collects_fee() {
    let d = deploy_factory();
    assert_eq!(d.registry.vault().balance(), units("0.01"));
    assert_eq!(d.registry.vault().fees_collected(), units("0.01"));
}

#[test]
fn test_create_initializes_sale() {
    let d = deploy_factory();
    assert_eq!(d.registry.total_sales(), 1);

    let sale = d.registry.get_sale(0).unwrap();
    assert_eq!(sale.token, d.token);
    assert_eq!(sale.creator, d.creator);
    assert_eq!(sale.sold, 0);
    assert_eq!(sale.raised, 0);
    assert_eq!(sale.status, SaleStatus::Open);
    assert!(sale.is_open);
}

#[test]
fn test_create_rejects_wrong_fee() {
    let mut d = deploy_factory();
    let before = d.registry.clone();

    for fee in [0, units("0.009"), units("0.011")] {
        let err = d.registry.create(&d.creator, "Other", "OTH", fee).unwrap_err();
        assert_eq!(err, LaunchpadError::InvalidFee { expected: units("0.01"), paid: fee });
    }
    assert_eq!(d.registry, before);
    assert_eq!(d.registry.total_sales(), 1);
}

#[test]
fn test_create_rejects_bad_metadata() {
    let mut d = deploy_factory();
    let err = d.registry.create(&d.creator, "", "OTH", units("0.01")).unwrap_err();
    assert!(matches!(err, LaunchpadError::InvalidMetadata(_)));
    let err = d.registry.create(&d.creator, "Other", "O-T", units("0.01")).unwrap_err();
    assert!(matches!(err, LaunchpadError::InvalidMetadata(_)));
    assert_eq!(d.registry.total_sales(), 1);
}

// ============================================
// Buying
// ============================================

#[test]
fn test_buy_updates_vault() {
    let d = buy_token();
    assert_eq!(d.registry.vault().balance(), units("0.01") + units("1"));
}

#[test]
fn test_buy_transfers_tokens() {
    let d = buy_token();
    assert_eq!(d.registry.balance_of(0, &d.buyer).unwrap(), AMOUNT);
    assert_eq!(d.registry.reserve_of(0).unwrap(), units("990000"));
}

#[test]
fn test_buy_updates_sale() {
    let d = buy_token();
    let sale = d.registry.sale_by_token(&d.token).unwrap();
    assert_eq!(sale.sold, AMOUNT);
    assert_eq!(sale.raised, units("1"));
    assert_eq!(sale.status, SaleStatus::Open);
}

#[test]
fn test_price_rises_along_curve() {
    let d = buy_token();
    let sale = d.registry.sale_by_token(&d.token).unwrap();
    assert_eq!(d.registry.get_cost(sale.sold).unwrap(), units("0.0002"));
    assert_eq!(d.registry.quote(0, AMOUNT).unwrap(), units("2"));
}

#[test]
fn test_buy_on_closed_sale_fails() {
    let mut d = buy_token();
    let buyer = d.buyer;
    d.registry.buy(&buyer, 0, AMOUNT, units("2")).unwrap();

    let before = d.registry.clone();
    let err = d.registry.buy(&buyer, 0, AMOUNT, units("10")).unwrap_err();
    assert_eq!(err, LaunchpadError::SaleNotOpen(0));
    assert_eq!(d.registry, before);
}

// ============================================
// Depositing
// ============================================

#[test]
fn test_second_purchase_closes_sale_and_deposit_pays_creator() {
    let mut d = buy_token();
    let (buyer, creator) = (d.buyer, d.creator);

    let receipt = d.registry.buy(&buyer, 0, AMOUNT, units("2")).unwrap();
    assert!(receipt.closed);
    assert_eq!(receipt.unit_price, units("0.0002"));

    let sale = d.registry.sale_by_token(&d.token).unwrap();
    assert!(!sale.is_open);
    assert_eq!(sale.status, SaleStatus::Closed);
    assert_eq!(sale.raised, units("3"));

    let deposit = d.registry.deposit(&creator, 0).unwrap();
    assert_eq!(deposit.units, units("980000"));
    assert_eq!(d.registry.balance_of(0, &creator).unwrap(), units("980000"));
    assert_eq!(d.registry.reserve_of(0).unwrap(), 0);
    assert_eq!(d.registry.get_sale(0).unwrap().status, SaleStatus::Finalized);

    // Deposits move tokens only
    assert_eq!(d.registry.vault().balance(), units("3.01"));

    let before = d.registry.clone();
    assert_eq!(d.registry.deposit(&creator, 0), Err(LaunchpadError::AlreadyFinalized(0)));
    assert_eq!(d.registry, before);
}

#[test]
fn test_deposit_while_open_fails() {
    let mut d = buy_token();
    let creator = d.creator;
    let before = d.registry.clone();
    assert_eq!(d.registry.deposit(&creator, 0), Err(LaunchpadError::SaleStillOpen(0)));
    assert_eq!(d.registry, before);
}

#[test]
fn test_deposit_by_stranger_fails() {
    let mut d = buy_token();
    let buyer = d.buyer;
    d.registry.buy(&buyer, 0, AMOUNT, units("2")).unwrap();

    let err = d.registry.deposit(&buyer, 0).unwrap_err();
    assert!(err.is_authorization());
    assert_eq!(d.registry.get_sale(0).unwrap().status, SaleStatus::Closed);
    assert_eq!(d.registry.deposit(&Pubkey::new_unique(), 7), Err(LaunchpadError::UnknownSale(7)));
}

// ============================================
// Withdrawing Fees
// ============================================

#[test]
fn test_owner_withdraws_fees() {
    let mut d = deploy_factory();
    let deployer = d.deployer;

    let payout = d.registry.withdraw(&deployer, units("0.01")).unwrap();
    assert_eq!(payout.amount, units("0.01"));
    assert_eq!(d.registry.vault().balance(), 0);

    let err = d.registry.withdraw(&deployer, 1).unwrap_err();
    assert_eq!(err, LaunchpadError::InsufficientFunds { available: 0, requested: 1 });
}

#[test]
fn test_withdraw_more_than_balance_fails() {
    let mut d = buy_token();
    let deployer = d.deployer;
    let err = d.registry.withdraw(&deployer, units("1.02")).unwrap_err();
    assert_eq!(err, LaunchpadError::InsufficientFunds { available: units("1.01"), requested: units("1.02") });
    assert_eq!(d.registry.vault().balance(), units("1.01"));
}

#[test]
fn test_stranger_cannot_withdraw() {
    let mut d = buy_token();
    let buyer = d.buyer;
    assert!(d.registry.withdraw(&buyer, 1).unwrap_err().is_authorization());
}

// ============================================
// Typed calls and snapshots
// ============================================

#[test]
fn test_lifecycle_through_calls() {
    let owner = Pubkey::new_unique();
    let creator = Pubkey::new_unique();
    let buyer = Pubkey::new_unique();
    let mut registry = SaleRegistry::new(owner, Pubkey::new_unique(), RegistryConfig::default()).unwrap();

    let calls = [
        Call::new(creator, Request::Create { name: "DAPP Uni".into(), ticker: "DAPP".into() }).with_value(units("0.01")),
        Call::new(buyer, Request::Buy { sale_id: 0, units: AMOUNT }).with_value(units("1")),
        Call::new(buyer, Request::Buy { sale_id: 0, units: AMOUNT }).with_value(units("2")),
        Call::new(creator, Request::Deposit { sale_id: 0 }),
        Call::new(owner, Request::Withdraw { amount: units("3.01") }),
    ];
    for call in &calls {
        registry.execute(call).unwrap();
    }

    assert_eq!(registry.vault().balance(), 0);
    assert_eq!(
        registry.execute(&Call::new(buyer, Request::BalanceOf { sale_id: 0, holder: creator })),
        Ok(Response::Amount(units("980000")))
    );
    assert_eq!(registry.drain_events().len(), 6);
}

#[test]
fn test_snapshot_round_trip_preserves_state() {
    let d = buy_token();
    let json = serde_json::to_string(&d.registry).unwrap();
    let restored: SaleRegistry = serde_json::from_str(&json).unwrap();

    restored.check_invariants().unwrap();
    assert_eq!(restored.get_sale(0).unwrap(), d.registry.get_sale(0).unwrap());
    assert_eq!(restored.balance_of(0, &d.buyer).unwrap(), AMOUNT);
    assert_eq!(restored.vault(), d.registry.vault());
}

#[test]
fn test_snapshot_with_edited_sale_is_rejected() {
    let d = buy_token();
    let json = serde_json::to_string(&d.registry).unwrap();

    // Inflate raised past the target while leaving the sale open and the vault untouched
    let raised = format!("\"raised\":{}", units("1"));
    assert!(json.contains(&raised));
    let inflated = json.replace(&raised, &format!("\"raised\":{}", units("9")));
    let tampered: SaleRegistry = serde_json::from_str(&inflated).unwrap();
    assert!(tampered.check_invariants().is_err());

    let mut d = buy_token();
    let buyer = d.buyer;
    d.registry.buy(&buyer, 0, AMOUNT, units("2")).unwrap();
    let json = serde_json::to_string(&d.registry).unwrap();
    assert!(json.contains("\"status\":\"closed\""));
    let reopened = json.replace("\"status\":\"closed\"", "\"status\":\"open\"");
    let tampered: SaleRegistry = serde_json::from_str(&reopened).unwrap();
    assert!(tampered.check_invariants().is_err());
}
