use animagus_core::client::{ClientConfig, ClientConnectError, GenericClient, Request};
use animagus_core::value::Value;
use generic_service::GenericServiceServer;
use generic_service_impl::GenericServiceImpl;
use std::time::Duration;
use tokio_stream::wrappers::TcpListenerStream;


async fn spawn_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        tonic::transport::Server::builder()
            .add_service(GenericServiceServer::new(GenericServiceImpl::default()))
            .serve_with_incoming(TcpListenerStream::new(listener))
            .await
            .unwrap();
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn test_calls_over_a_real_channel() {
    let url = spawn_server().await;
    let config = ClientConfig::new(url)
        .connect_timeout(Duration::from_secs(5))
        .timeout(Duration::from_secs(5));

    let mut client = GenericClient::connect_with(config).await.unwrap();

    let value = client
        .call(Request::new("echo").param(Value::uint64(42)))
        .await
        .unwrap();
    assert_eq!(value, Value::list([Value::uint64(42)]));

    let mut stream = client
        .stream(Request::new("counter").param(Value::uint64(2)))
        .await
        .unwrap();
    assert_eq!(stream.next().await.unwrap().unwrap(), Value::uint64(0));
    assert_eq!(stream.next().await.unwrap().unwrap(), Value::uint64(1));
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn test_connect_reports_unreachable_servers() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config =
        ClientConfig::new(format!("http://{addr}")).connect_timeout(Duration::from_secs(2));
    let err = GenericClient::connect_with(config).await.unwrap_err();

    assert!(matches!(err, ClientConnectError::ConnectionFailed(..)));
}
