use animagus_core::GenericClient;
use animagus_core::client::{CallError, TransportError};
use animagus_core::codec::hex::{bin_to_hex, hex_to_bin};
use animagus_core::queries::QueryError;
use generic_service::GenericServiceServer;
use generic_service_impl::{CAPACITY_PER_BYTE, DEPOSIT_COUNT, GenericServiceImpl, UDT_AMOUNT};
use tonic::Code;


fn client() -> GenericClient<GenericServiceServer<GenericServiceImpl>> {
    GenericClient::from_service(GenericServiceServer::new(GenericServiceImpl::default()))
}

#[tokio::test]
async fn test_balance_returns_capacity() {
    let mut client = client();
    let lock_args = hex_to_bin("0x7c7f0ee1d582c385342367792946e695d5cd2a29").unwrap();

    let capacity = client.balance(&lock_args).await.unwrap();

    assert_eq!(capacity, 20 * CAPACITY_PER_BYTE);
}

#[tokio::test]
async fn test_balance_accepts_empty_lock_args() {
    let mut client = client();

    assert_eq!(client.balance(&[]).await.unwrap(), 0);
}

#[tokio::test]
async fn test_udt_balance_unpacks_amount128() {
    let mut client = client();
    let type_args = hex_to_bin("0x32e555f3ff8e135cece1351a6a2971518392c1e30375c1e006ad0ce8eac07947")
        .unwrap();
    let lock_args = hex_to_bin("0x7c7f0ee1d582c385342367792946e695d5cd2a29").unwrap();

    let amount = client.udt_balance(&type_args, &lock_args).await.unwrap();

    assert_eq!(amount, UDT_AMOUNT);
    assert!(amount > u64::MAX as u128);
}

#[tokio::test]
async fn test_transfer_parses_the_returned_document() {
    let mut client = client();
    let udt = vec![0x32; 32];
    let from = vec![0x7c; 20];
    let to = vec![0x3f; 20];

    let tx = client.transfer(&udt, &from, &to, 1000).await.unwrap();

    assert_eq!(tx["udt"], bin_to_hex(&udt));
    assert_eq!(tx["from"], bin_to_hex(&from));
    assert_eq!(tx["to"], bin_to_hex(&to));
    assert_eq!(tx["amount"], 1000);
}

#[tokio::test]
async fn test_transfer_surfaces_server_rejections() {
    let mut client = client();

    let err = client
        .transfer(&[0x32; 32], &[0x7c; 20], &[0x3f; 20], 0)
        .await
        .unwrap_err();

    match err {
        QueryError::Call(CallError::Transport(TransportError::Status(status))) => {
            assert_eq!(status.code(), Code::InvalidArgument);
        }
        other => panic!("Expected an invalid argument status, got {other:?}"),
    }
}

#[tokio::test]
async fn test_nervosdao_deposits_yields_every_deposit() {
    let mut client = client();

    let mut deposits = client.nervosdao_deposits().await.unwrap();

    let mut seen = Vec::new();
    while let Some(deposit) = deposits.next().await {
        seen.push(deposit.unwrap());
    }

    assert_eq!(seen.len(), DEPOSIT_COUNT as usize);
    for (i, deposit) in seen.iter().enumerate() {
        assert_eq!(deposit.tx_hash, vec![i as u8; 32]);
        assert_eq!(deposit.index, i as u64);
    }
    assert_eq!(deposits.received(), DEPOSIT_COUNT as usize);
    assert_eq!(
        seen[1].to_string(),
        format!(
            "New NervosDAO deposit at tx hash: {}, index: 1",
            bin_to_hex(&[1; 32])
        )
    );
}

#[tokio::test]
async fn test_nervosdao_deposits_can_be_cancelled() {
    let mut client = client();

    let mut deposits = client.nervosdao_deposits().await.unwrap();
    let first = deposits.next().await.unwrap().unwrap();
    assert_eq!(first.index, 0);

    deposits.cancel();

    // The client stays usable after a cancelled subscription.
    assert_eq!(client.balance(&[0x01]).await.unwrap(), CAPACITY_PER_BYTE);
}
