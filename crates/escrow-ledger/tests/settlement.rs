//! End-to-end settlement scenarios: full deposit → settle flows across
//! buyer, seller, and arbiter, plus the atomic-failure contract when the
//! asset collaborator declines mid-operation.

use escrow_core::{AccountId, Amount, OrderId};
use escrow_ledger::{
    AssetTransfer, EscrowLedger, InMemoryAssets, LedgerError, LedgerEvent, OrderState,
    SingleArbiter, TransferError,
};

struct World {
    ledger: EscrowLedger<InMemoryAssets>,
    buyer: AccountId,
    seller: AccountId,
    arbiter: AccountId,
    custody: AccountId,
}

fn world() -> World {
    let buyer = AccountId::new();
    let seller = AccountId::new();
    let arbiter = AccountId::new();
    let custody = AccountId::new();

    let mut assets = InMemoryAssets::new();
    assets.mint(&buyer, Amount::new(1_000));
    assets.approve(&buyer, &custody, Amount::new(1_000));

    World {
        ledger: EscrowLedger::new(custody, SingleArbiter::new(arbiter), assets),
        buyer,
        seller,
        arbiter,
        custody,
    }
}

#[test]
fn buyer_releases_to_seller() {
    let mut w = world();
    let id = OrderId::from(1);

    w.ledger
        .deposit(id, w.buyer, w.seller, Amount::new(100))
        .unwrap();
    let order = w.ledger.order(id).unwrap();
    assert_eq!(order.buyer, w.buyer);
    assert_eq!(order.seller, w.seller);
    assert_eq!(order.amount, Amount::new(100));
    assert_eq!(order.state, OrderState::Created);
    assert_eq!(w.ledger.assets().balance_of(&w.custody), Amount::new(100));

    w.ledger.release(id, w.buyer).unwrap();
    assert_eq!(w.ledger.assets().balance_of(&w.seller), Amount::new(100));
    assert_eq!(w.ledger.assets().balance_of(&w.custody), Amount::ZERO);
    assert_eq!(w.ledger.order(id).unwrap().state, OrderState::Released);

    let second = w.ledger.release(id, w.buyer);
    assert!(matches!(second, Err(LedgerError::InvalidState { .. })));
}

#[test]
fn seller_refunds_buyer() {
    let mut w = world();
    let id = OrderId::from(2);

    w.ledger
        .deposit(id, w.buyer, w.seller, Amount::new(50))
        .unwrap();
    w.ledger.refund(id, w.seller).unwrap();

    assert_eq!(w.ledger.assets().balance_of(&w.buyer), Amount::new(1_000));
    assert_eq!(w.ledger.order(id).unwrap().state, OrderState::Refunded);
}

#[test]
fn arbiter_awards_seller() {
    let mut w = world();
    let id = OrderId::from(3);

    w.ledger
        .deposit(id, w.buyer, w.seller, Amount::new(10))
        .unwrap();
    w.ledger.resolve_dispute(id, w.seller, w.arbiter).unwrap();

    assert_eq!(w.ledger.assets().balance_of(&w.seller), Amount::new(10));
    assert_eq!(w.ledger.order(id).unwrap().state, OrderState::Released);

    // Both the underlying fact and the dispute fact are on the trail.
    let kinds: Vec<&LedgerEvent> = w.ledger.events().iter().map(|r| &r.event).collect();
    assert!(matches!(kinds[1], LedgerEvent::Released { .. }));
    assert!(matches!(kinds[2], LedgerEvent::DisputeResolved { .. }));
}

#[test]
fn non_arbiter_cannot_force_resolution() {
    let mut w = world();
    let id = OrderId::from(4);

    w.ledger
        .deposit(id, w.buyer, w.seller, Amount::new(10))
        .unwrap();
    let intruder = AccountId::new();
    let result = w.ledger.resolve_dispute(id, w.seller, intruder);

    assert!(matches!(result, Err(LedgerError::NotAuthorized { .. })));
    assert_eq!(w.ledger.order(id).unwrap().state, OrderState::Created);
    assert_eq!(w.ledger.assets().balance_of(&w.custody), Amount::new(10));
}

#[test]
fn audit_trail_orders_by_completion() {
    let mut w = world();
    w.ledger
        .deposit(OrderId::from(1), w.buyer, w.seller, Amount::new(10))
        .unwrap();
    w.ledger
        .deposit(OrderId::from(2), w.buyer, w.seller, Amount::new(20))
        .unwrap();
    w.ledger.release(OrderId::from(2), w.buyer).unwrap();
    w.ledger.refund(OrderId::from(1), w.seller).unwrap();

    let seqs: Vec<u64> = w.ledger.events().iter().map(|r| r.seq).collect();
    assert_eq!(seqs, vec![0, 1, 2, 3]);
    assert!(matches!(
        w.ledger.events()[2].event,
        LedgerEvent::Released { order_id, .. } if order_id == OrderId::from(2)
    ));
    assert!(matches!(
        w.ledger.events()[3].event,
        LedgerEvent::Refunded { order_id, .. } if order_id == OrderId::from(1)
    ));

    let for_one: Vec<u64> = w
        .ledger
        .event_log()
        .for_order(OrderId::from(1))
        .map(|r| r.seq)
        .collect();
    assert_eq!(for_one, vec![0, 3]);
}

// ── Atomic failure when the collaborator declines ────────────────────

/// Asset backend that accepts deposits but declines every payout.
struct DecliningPayouts {
    inner: InMemoryAssets,
}

impl AssetTransfer for DecliningPayouts {
    fn transfer(
        &mut self,
        _from: &AccountId,
        _to: &AccountId,
        _amount: Amount,
    ) -> Result<(), TransferError> {
        Err(TransferError::Declined("payouts suspended".to_string()))
    }

    fn transfer_from(
        &mut self,
        owner: &AccountId,
        spender: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        self.inner.transfer_from(owner, spender, to, amount)
    }
}

#[test]
fn declined_payout_leaves_order_open() {
    let buyer = AccountId::new();
    let seller = AccountId::new();
    let arbiter = AccountId::new();
    let custody = AccountId::new();

    let mut inner = InMemoryAssets::new();
    inner.mint(&buyer, Amount::new(100));
    inner.approve(&buyer, &custody, Amount::new(100));

    let mut ledger = EscrowLedger::new(
        custody,
        SingleArbiter::new(arbiter),
        DecliningPayouts { inner },
    );
    let id = OrderId::from(1);
    ledger.deposit(id, buyer, seller, Amount::new(100)).unwrap();

    for result in [
        ledger.release(id, buyer),
        ledger.refund(id, seller),
        ledger.resolve_dispute(id, seller, arbiter),
    ] {
        assert!(matches!(result, Err(LedgerError::Transfer(_))));
    }

    // Still open, still fully in custody, and every failed attempt left
    // the audit trail untouched.
    assert_eq!(ledger.order(id).unwrap().state, OrderState::Created);
    assert!(ledger.order(id).unwrap().resolved_at.is_none());
    assert_eq!(ledger.events().len(), 1);
    assert_eq!(
        ledger.assets().inner.balance_of(&custody),
        Amount::new(100)
    );
}
