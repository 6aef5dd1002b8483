//! Create-token flow: ticket encoding, contract call and user feedback.

use ticket_minter::blockchain::{format_bytes32_string, parse_bytes32_string};
use ticket_minter::config::{FeedbackMode, UiConfig};
use ticket_minter::controller::{ControllerError, PageAction, TokenRequest, PENDING_STATUS};
use ticket_minter::ui::{ElementId, MemoryPage};
use ticket_minter::PageController;

mod common;

use common::{FakeChain, FakeWallet, RecordingPage, FAKE_TX_HASH};

async fn connected(ui: UiConfig) -> (std::sync::Arc<FakeWallet>, PageController<MemoryPage>) {
    let wallet = FakeWallet::new(FakeChain::on("rinkeby", 4), true);
    let mut controller = common::controller(&wallet, ui);
    controller.connect(None).await.unwrap();
    (wallet, controller)
}

fn status_ui() -> UiConfig {
    UiConfig {
        feedback: FeedbackMode::Status,
        disable_submit_while_pending: true,
        ..UiConfig::default()
    }
}

#[tokio::test]
async fn test_longest_ticket_is_minted() {
    let (wallet, mut controller) = connected(UiConfig::default()).await;
    let ticket = "a".repeat(31);

    let page = controller.page_mut();
    page.set_input(ElementId::TokenRecipient, &common::recipient());
    page.set_input(ElementId::Ticket, &ticket);
    let tx_hash = controller.create_token().await.unwrap();

    assert_eq!(tx_hash, FAKE_TX_HASH);
    assert_eq!(
        controller.page().text(ElementId::TxHash),
        FAKE_TX_HASH.to_string()
    );
    assert!(controller.page().alerts().is_empty());

    let calls = wallet.chain.calls();
    assert_eq!(calls.len(), 1);
    let (contract, recipient, encoded) = calls[0];
    assert_eq!(contract, common::contract_address());
    assert_eq!(recipient.to_string(), common::recipient());
    assert_eq!(parse_bytes32_string(&encoded).unwrap(), ticket);
}

#[tokio::test]
async fn test_oversized_ticket_never_reaches_contract() {
    let (wallet, mut controller) = connected(UiConfig::default()).await;

    let request = TokenRequest {
        recipient_address: common::recipient(),
        ticket_value: "x".repeat(33),
    };
    let err = controller.submit_token_request(request).await.unwrap_err();

    assert!(matches!(err, ControllerError::Encoding(_)));
    assert!(wallet.chain.calls().is_empty());

    let alerts = controller.page().alerts();
    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].starts_with("format ticket value error: "));
    assert_eq!(controller.page().text(ElementId::TxHash), "");
}

#[tokio::test]
async fn test_ticket_with_multibyte_characters_counts_bytes() {
    let (wallet, mut controller) = connected(UiConfig::default()).await;

    // 16 two-byte characters: 32 bytes.
    let request = TokenRequest {
        recipient_address: common::recipient(),
        ticket_value: "é".repeat(16),
    };
    let err = controller.submit_token_request(request).await.unwrap_err();

    assert!(matches!(err, ControllerError::Encoding(_)));
    assert!(wallet.chain.calls().is_empty());
}

#[tokio::test]
async fn test_empty_ticket_is_allowed() {
    let (wallet, mut controller) = connected(UiConfig::default()).await;

    let request = TokenRequest {
        recipient_address: common::recipient(),
        ticket_value: String::new(),
    };
    controller.submit_token_request(request).await.unwrap();

    let calls = wallet.chain.calls();
    assert_eq!(calls[0].2, format_bytes32_string("").unwrap());
}

#[tokio::test]
async fn test_invalid_recipient_is_rejected() {
    let (wallet, mut controller) = connected(UiConfig::default()).await;

    let request = TokenRequest {
        recipient_address: "0x1234".to_string(),
        ticket_value: "seat 12".to_string(),
    };
    let err = controller.submit_token_request(request).await.unwrap_err();

    assert!(matches!(err, ControllerError::InvalidRecipient { .. }));
    assert!(wallet.chain.calls().is_empty());
    assert!(controller.page().alerts()[0]
        .starts_with("Create token error. See wallet for more details. "));
}

#[tokio::test]
async fn test_contract_failure_is_reported() {
    let (wallet, mut controller) = connected(UiConfig::default()).await;
    wallet.chain.fail_submit("user rejected transaction");

    let request = TokenRequest {
        recipient_address: common::recipient(),
        ticket_value: "seat 12".to_string(),
    };
    let err = controller.submit_token_request(request).await.unwrap_err();

    assert!(matches!(err, ControllerError::Blockchain(_)));
    assert_eq!(
        controller.page().alerts(),
        ["Create token error. See wallet for more details. Transaction failed: user rejected transaction"]
    );
}

#[tokio::test]
async fn test_create_token_requires_connection() {
    let wallet = FakeWallet::new(FakeChain::on("rinkeby", 4), true);
    let mut controller = common::controller(&wallet, UiConfig::default());

    controller.dispatch(PageAction::CreateToken).await;

    assert!(wallet.chain.calls().is_empty());
    assert_eq!(controller.page().alerts().len(), 1);
    assert!(controller.page().alerts()[0].ends_with("no wallet connected"));
}

#[tokio::test]
async fn test_retry_after_encoding_error() {
    let (wallet, mut controller) = connected(UiConfig::default()).await;

    let too_long = TokenRequest {
        recipient_address: common::recipient(),
        ticket_value: "x".repeat(40),
    };
    assert!(controller.submit_token_request(too_long).await.is_err());

    let ok = TokenRequest {
        recipient_address: common::recipient(),
        ticket_value: "row 7 seat 12".to_string(),
    };
    controller.submit_token_request(ok).await.unwrap();

    assert_eq!(wallet.chain.calls().len(), 1);
}

#[tokio::test]
async fn test_status_mode_shows_hash_in_status() {
    let (_wallet, mut controller) = connected(status_ui()).await;

    let request = TokenRequest {
        recipient_address: common::recipient(),
        ticket_value: "seat 12".to_string(),
    };
    controller.submit_token_request(request).await.unwrap();

    let page = controller.page();
    assert_eq!(page.text(ElementId::Status), FAKE_TX_HASH.to_string());
    assert_eq!(page.text(ElementId::TxHash), "");
    assert!(!page.is_disabled(ElementId::BtnCreateToken));
}

#[tokio::test]
async fn test_status_mode_reports_errors_inline() {
    let (_wallet, mut controller) = connected(status_ui()).await;

    let request = TokenRequest {
        recipient_address: common::recipient(),
        ticket_value: "x".repeat(33),
    };
    let _ = controller.submit_token_request(request).await;

    let page = controller.page();
    assert!(page.alerts().is_empty());
    assert!(page
        .text(ElementId::Status)
        .starts_with("format ticket value error: "));
    assert!(!page.is_disabled(ElementId::BtnCreateToken));
}

#[tokio::test]
async fn test_submit_button_locked_while_pending() {
    let wallet = FakeWallet::new(FakeChain::on("rinkeby", 4), true);
    let mut controller = common::controller_with(&wallet, RecordingPage::default(), status_ui());
    controller.connect(None).await.unwrap();
    controller.page_mut().log.clear();

    let request = TokenRequest {
        recipient_address: common::recipient(),
        ticket_value: "seat 12".to_string(),
    };
    controller.submit_token_request(request).await.unwrap();

    assert_eq!(
        controller.page().log,
        vec![
            "disabled #btn-create-token true".to_string(),
            format!("text #status {PENDING_STATUS}"),
            "disabled #btn-create-token false".to_string(),
            format!("text #status {FAKE_TX_HASH}"),
        ]
    );
}

#[tokio::test]
async fn test_alert_mode_does_not_lock_submit() {
    let wallet = FakeWallet::new(FakeChain::on("rinkeby", 4), true);
    let mut controller =
        common::controller_with(&wallet, RecordingPage::default(), UiConfig::default());
    controller.connect(None).await.unwrap();
    controller.page_mut().log.clear();

    let request = TokenRequest {
        recipient_address: common::recipient(),
        ticket_value: "seat 12".to_string(),
    };
    controller.submit_token_request(request).await.unwrap();

    assert_eq!(
        controller.page().log,
        vec![format!("text #txhash {FAKE_TX_HASH}")]
    );
}

#[tokio::test]
async fn test_alert_mode_lock_clears_pending_status() {
    let ui = UiConfig {
        disable_submit_while_pending: true,
        ..UiConfig::default()
    };
    let (_wallet, mut controller) = connected(ui).await;

    let too_long = TokenRequest {
        recipient_address: common::recipient(),
        ticket_value: "x".repeat(33),
    };
    assert!(controller.submit_token_request(too_long).await.is_err());

    let page = controller.page();
    assert_eq!(page.text(ElementId::Status), "");
    assert!(!page.is_disabled(ElementId::BtnCreateToken));
    assert_eq!(page.alerts().len(), 1);

    let ok = TokenRequest {
        recipient_address: common::recipient(),
        ticket_value: "seat 12".to_string(),
    };
    controller.submit_token_request(ok).await.unwrap();

    let page = controller.page();
    assert_eq!(page.text(ElementId::Status), "");
    assert_eq!(page.text(ElementId::TxHash), FAKE_TX_HASH.to_string());
    assert!(!page.is_disabled(ElementId::BtnCreateToken));
}
