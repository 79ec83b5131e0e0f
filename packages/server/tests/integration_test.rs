//! Integration tests for the TCP chat server, driving an in-process server
//! with raw line-protocol clients.

mod common;

use std::time::Duration;

use common::{TestClient, TestServer};
use irori_server::config::ServerConfig;

#[tokio::test]
async fn test_register_then_list_users() {
    // テスト項目: REGISTER "Alice" が成功し、LIST_USERS に "Alice" が含まれる
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = TestClient::connect(server.addr).await;

    // when (操作):
    let registered = alice.request("REGISTER", "Alice").await;
    let users = alice.request("LIST_USERS", "").await;

    // then (期待する結果):
    assert!(registered.success);
    assert!(registered.message.contains("Alice"));
    assert!(users.success);
    assert_eq!(users.message, "Online users");
    assert_eq!(users.data, "Alice");
}

#[tokio::test]
async fn test_message_is_broadcast_to_other_clients() {
    // テスト項目: Alice の MESSAGE が Bob に非同期で届き、Alice 自身には届かない
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = TestClient::connect(server.addr).await;
    let mut bob = TestClient::connect(server.addr).await;
    alice.request("REGISTER", "Alice").await;
    bob.request("REGISTER", "Bob").await;

    // when (操作):
    let reply = alice.request("MESSAGE", "hi").await;

    // then (期待する結果):
    assert!(reply.success);
    assert_eq!(reply.message, "Message broadcasted");
    let notification = bob.recv().await;
    assert!(notification.success);
    assert!(notification.message.contains("Alice"));
    assert!(notification.message.contains("hi"));
    assert_eq!(notification.data, "Alice");
    alice.expect_silence(Duration::from_millis(200)).await;
}

#[tokio::test]
async fn test_broadcast_reaches_anonymous_clients() {
    // テスト項目: 未登録（anonymous）のクライアントにもブロードキャストが届く
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = TestClient::connect(server.addr).await;
    let mut lurker = TestClient::connect(server.addr).await;
    alice.request("REGISTER", "Alice").await;

    // when (操作):
    alice.request("MESSAGE", "anyone here?").await;

    // then (期待する結果):
    let notification = lurker.recv().await;
    assert!(notification.message.ends_with("Alice: anyone here?"));
}

#[tokio::test]
async fn test_client_supplied_sender_is_ignored() {
    // テスト項目: クライアントが送った from は無視され、登録名が使われる
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = TestClient::connect(server.addr).await;
    let mut bob = TestClient::connect(server.addr).await;
    alice.request("REGISTER", "Alice").await;

    // when (操作):
    alice
        .send_raw(b"{\"command\":\"MESSAGE\",\"data\":\"trust me\",\"from\":\"Mallory\"}\n")
        .await;
    let reply = alice.recv().await;

    // then (期待する結果):
    assert!(reply.success);
    let notification = bob.recv().await;
    assert_eq!(notification.data, "Alice");
    assert!(!notification.message.contains("Mallory"));
}

#[tokio::test]
async fn test_echo_returns_data_exactly() {
    // テスト項目: ECHO "ping" は data == "ping" を返す
    // given (前提条件):
    let server = TestServer::start().await;
    let mut client = TestClient::connect(server.addr).await;

    // when (操作):
    let response = client.request("ECHO", "ping").await;

    // then (期待する結果):
    assert!(response.success);
    assert_eq!(response.data, "ping");
}

#[tokio::test]
async fn test_unknown_command_is_rejected() {
    // テスト項目: 未知のコマンド "FOO" は "Unknown command" で失敗し、接続は継続する
    // given (前提条件):
    let server = TestServer::start().await;
    let mut client = TestClient::connect(server.addr).await;

    // when (操作):
    let response = client.request("FOO", "").await;

    // then (期待する結果):
    assert!(!response.success);
    assert_eq!(response.message, "Unknown command");
    assert!(client.request("ECHO", "still here").await.success);
}

#[tokio::test]
async fn test_list_messages_without_history() {
    // テスト項目: メッセージが無い状態の LIST_MESSAGES は "No messages yet"
    // given (前提条件):
    let server = TestServer::start().await;
    let mut client = TestClient::connect(server.addr).await;

    // when (操作):
    let response = client.request("LIST_MESSAGES", "").await;

    // then (期待する結果):
    assert!(response.success);
    assert_eq!(response.data, "No messages yet");
}

#[tokio::test]
async fn test_quit_replies_then_closes() {
    // テスト項目: QUIT は "Goodbye!" を返し、その後サーバー側から切断される
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = TestClient::connect(server.addr).await;
    let mut bob = TestClient::connect(server.addr).await;

    // when (操作):
    let goodbye = alice.request("QUIT", "").await;
    bob.request("MESSAGE", "are you gone?").await;

    // then (期待する結果):
    assert!(goodbye.success);
    assert_eq!(goodbye.message, "Goodbye!");
    alice.expect_closed().await;
    let users = bob.request("LIST_USERS", "").await;
    assert_eq!(users.data, "anonymous");
}

#[tokio::test]
async fn test_missing_data_is_rejected() {
    // テスト項目: ECHO / REGISTER / MESSAGE は data が空だと失敗する
    // given (前提条件):
    let server = TestServer::start().await;
    let mut client = TestClient::connect(server.addr).await;

    for command in ["ECHO", "REGISTER", "MESSAGE"] {
        // when (操作):
        let response = client.request(command, "").await;

        // then (期待する結果):
        assert!(!response.success, "{command} accepted empty data");
        assert_eq!(response.message, format!("Command {command} requires data"));
    }
    let users = client.request("LIST_USERS", "").await;
    assert_eq!(users.data, "anonymous");
}

#[tokio::test]
async fn test_malformed_lines_keep_connection_open() {
    // テスト項目: 不正な行は "Invalid message format" になり、接続は継続する
    // given (前提条件):
    let server = TestServer::start().await;
    let mut client = TestClient::connect(server.addr).await;

    for line in [
        b"not json\n".as_slice(),
        b"\n".as_slice(),
        b"{\"data\":\"no command\"}\n".as_slice(),
        b"\xff\xfe\n".as_slice(),
    ] {
        // when (操作):
        client.send_raw(line).await;
        let response = client.recv().await;

        // then (期待する結果):
        assert!(!response.success);
        assert_eq!(response.message, "Invalid message format");
    }
    assert_eq!(client.request("ECHO", "ok").await.data, "ok");
}

#[tokio::test]
async fn test_crlf_terminated_request() {
    // テスト項目: CRLF で終わる行も受け付ける
    // given (前提条件):
    let server = TestServer::start().await;
    let mut client = TestClient::connect(server.addr).await;

    // when (操作):
    client
        .send_raw(b"{\"command\":\"ECHO\",\"data\":\"crlf\"}\r\n")
        .await;
    let response = client.recv().await;

    // then (期待する結果):
    assert!(response.success);
    assert_eq!(response.data, "crlf");
}

#[tokio::test]
async fn test_oversized_line_closes_connection() {
    // テスト項目: 64 KiB を超える行は転送エラーとして接続を閉じる
    // given (前提条件):
    let server = TestServer::start().await;
    let mut client = TestClient::connect(server.addr).await;

    // when (操作):
    // The server may reset the socket before the whole line is written
    let _ = client.try_send_raw(&vec![b'a'; 70 * 1024]).await;

    // then (期待する結果):
    client.expect_closed().await;
}

#[tokio::test]
async fn test_history_keeps_last_twenty_in_order() {
    // テスト項目: 25 件送信後の LIST_MESSAGES は最後の 20 件を古い順に返す
    // given (前提条件):
    let server = TestServer::start().await;
    let mut client = TestClient::connect(server.addr).await;
    client.request("REGISTER", "Alice").await;
    for i in 1..=25 {
        assert!(client.request("MESSAGE", &format!("m{i}")).await.success);
    }

    // when (操作):
    let response = client.request("LIST_MESSAGES", "").await;

    // then (期待する結果):
    let lines: Vec<&str> = response.data.lines().collect();
    assert_eq!(lines.len(), 20);
    assert!(lines[0].ends_with("Alice: m6"));
    assert!(lines[19].ends_with("Alice: m25"));
}

#[tokio::test]
async fn test_concurrent_senders() {
    // テスト項目: 複数クライアントの同時送信が全て成功し、履歴は直近 20 件に保たれる
    // given (前提条件):
    let server = TestServer::start().await;
    let mut clients = Vec::new();
    for n in 0..5 {
        let mut client = TestClient::connect(server.addr).await;
        client.request("REGISTER", &format!("user{n}")).await;
        clients.push(client);
    }

    // when (操作):
    let mut handles = Vec::new();
    for (n, mut client) in clients.into_iter().enumerate() {
        handles.push(tokio::spawn(async move {
            for i in 0..10 {
                client.send("MESSAGE", &format!("{n}-{i}")).await;
            }
            // 10 replies plus 40 notifications from the others
            let mut replies = 0;
            for _ in 0..50 {
                if client.recv().await.message == "Message broadcasted" {
                    replies += 1;
                }
            }
            (client, replies)
        }));
    }
    let mut clients = Vec::new();
    for handle in handles {
        let (client, replies) = handle.await.unwrap();
        assert_eq!(replies, 10);
        clients.push(client);
    }

    // then (期待する結果):
    let response = clients[0].request("LIST_MESSAGES", "").await;
    assert_eq!(response.data.lines().count(), 20);
}

#[tokio::test]
async fn test_time_is_rfc3339() {
    // テスト項目: TIME は RFC 3339 形式の時刻を返す
    // given (前提条件):
    let server = TestServer::start().await;
    let mut client = TestClient::connect(server.addr).await;

    // when (操作):
    let response = client.request("TIME", "").await;

    // then (期待する結果):
    assert!(response.success);
    assert_eq!(response.message, "Server time");
    assert!(chrono::DateTime::parse_from_rfc3339(&response.data).is_ok());
}

#[tokio::test]
async fn test_idle_connection_is_closed() {
    // テスト項目: アイドルタイムアウトを過ぎた接続はサーバー側から閉じられる
    // given (前提条件):
    let config = ServerConfig::new("127.0.0.1:0").with_idle_timeout(Duration::from_millis(200));
    let server = TestServer::start_with(config).await;
    let mut idle = TestClient::connect(server.addr).await;
    idle.request("REGISTER", "sleepy").await;

    // when (操作):
    idle.expect_closed().await;

    // then (期待する結果):
    let mut observer = TestClient::connect(server.addr).await;
    let users = observer.request("LIST_USERS", "").await;
    assert_eq!(users.data, "anonymous");
}

#[tokio::test]
async fn test_client_that_stops_reading_is_disconnected() {
    // テスト項目: 応答を読まずにリクエストを送り続けるクライアントは切断され、他のクライアントは影響を受けない
    // given (前提条件):
    let config = ServerConfig::new("127.0.0.1:0")
        .with_write_timeout(Duration::from_millis(300))
        .with_outbound_capacity(4);
    let server = TestServer::start_with(config).await;
    let mut hog = TestClient::connect(server.addr).await;
    hog.request("REGISTER", "hog").await;
    let big = "x".repeat(60_000);
    for _ in 0..20 {
        assert!(hog.request("MESSAGE", &big).await.success);
    }
    let mut observer = TestClient::connect(server.addr).await;

    // when (操作):
    // Each reply is over 1 MB; none of them is read
    let pipelined = "{\"command\":\"LIST_MESSAGES\"}\n".repeat(300);
    hog.send_raw(pipelined.as_bytes()).await;

    // then (期待する結果):
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    loop {
        let users = observer.request("LIST_USERS", "").await;
        if users.data == "anonymous" {
            break;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "Stalled client was not disconnected, users: {}",
            users.data
        );
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    hog.drain_until_closed(Duration::from_secs(5)).await;
    assert_eq!(observer.request("ECHO", "still here").await.data, "still here");
}

#[tokio::test]
async fn test_shutdown_closes_live_connections() {
    // テスト項目: シャットダウン時、接続中の全クライアントが切断される
    // given (前提条件):
    let server = TestServer::start().await;
    let addr = server.addr;
    let mut alice = TestClient::connect(addr).await;
    let mut bob = TestClient::connect(addr).await;
    alice.request("REGISTER", "Alice").await;

    // when (操作):
    server.shutdown().await;

    // then (期待する結果):
    alice.expect_closed().await;
    bob.expect_closed().await;
    assert!(tokio::net::TcpStream::connect(addr).await.is_err());
}
