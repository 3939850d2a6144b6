use hermes_dns_domain::ServerConfig;
use hermes_dns_infrastructure::dns::DnsServerHandler;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

const UDP_RECV_BUFFER: usize = 4096;

/// Listener settings taken from `[server]`.
#[derive(Debug, Clone, Copy)]
pub struct ListenerOptions {
    pub tcp_idle_timeout: Duration,
    /// UDP queries resolved at once; datagrams beyond this are dropped.
    pub max_concurrent_queries: usize,
}

impl From<&ServerConfig> for ListenerOptions {
    fn from(config: &ServerConfig) -> Self {
        Self {
            tcp_idle_timeout: Duration::from_secs(config.tcp_idle_timeout_secs),
            max_concurrent_queries: config.max_concurrent_queries,
        }
    }
}

pub async fn start_dns_server(
    socket_addr: SocketAddr,
    handler: Arc<DnsServerHandler>,
    options: ListenerOptions,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    info!(bind_address = %socket_addr, "Starting DNS server");

    let udp_socket = Arc::new(create_udp_socket(domain, socket_addr)?);
    let tcp_listener = create_tcp_listener(domain, socket_addr)?;

    let mut join_set: JoinSet<()> = JoinSet::new();
    let udp_limit = Arc::new(Semaphore::new(options.max_concurrent_queries));
    join_set.spawn(run_udp(udp_socket, handler.clone(), udp_limit, shutdown.clone()));
    join_set.spawn(run_tcp(tcp_listener, handler, options.tcp_idle_timeout, shutdown));

    info!("DNS server ready on {} (udp+tcp)", socket_addr);

    while join_set.join_next().await.is_some() {}
    info!("DNS server stopped");
    Ok(())
}

async fn run_udp(
    socket: Arc<UdpSocket>,
    handler: Arc<DnsServerHandler>,
    limit: Arc<Semaphore>,
    shutdown: CancellationToken,
) {
    let mut recv_buf = [0u8; UDP_RECV_BUFFER];

    loop {
        let (n, from) = tokio::select! {
            _ = shutdown.cancelled() => break,
            received = socket.recv_from(&mut recv_buf) => match received {
                Ok(r) => r,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    // ICMP port-unreachable from a previous reply surfaces here on some platforms.
                    debug!(error = %e, "UDP recv error");
                    continue;
                }
            },
        };

        let Ok(permit) = limit.clone().try_acquire_owned() else {
            debug!(client = %from, "UDP query limit reached, dropping datagram");
            continue;
        };

        let owned_buf: Arc<[u8]> = Arc::from(&recv_buf[..n]);
        let handler = handler.clone();
        let socket = socket.clone();
        tokio::spawn(async move {
            let _permit = permit;
            if let Some(response) = handler.handle_datagram(&owned_buf).await {
                if let Err(e) = socket.send_to(&response, from).await {
                    debug!(client = %from, error = %e, "UDP send failed");
                }
            }
        });
    }
}

async fn run_tcp(
    listener: TcpListener,
    handler: Arc<DnsServerHandler>,
    idle_timeout: Duration,
    shutdown: CancellationToken,
) {
    loop {
        let (stream, peer) = tokio::select! {
            _ = shutdown.cancelled() => break,
            accepted = listener.accept() => match accepted {
                Ok(a) => a,
                Err(e) => {
                    warn!(error = %e, "TCP accept failed");
                    continue;
                }
            },
        };

        let handler = handler.clone();
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if let Err(e) = serve_tcp_connection(stream, handler, idle_timeout, shutdown).await {
                debug!(client = %peer, error = %e, "TCP connection closed with error");
            }
        });
    }
}

/// Serves length-prefixed queries until the client goes idle or disconnects.
async fn serve_tcp_connection(
    mut stream: TcpStream,
    handler: Arc<DnsServerHandler>,
    idle_timeout: Duration,
    shutdown: CancellationToken,
) -> io::Result<()> {
    loop {
        let mut len_buf = [0u8; 2];
        let read = tokio::select! {
            _ = shutdown.cancelled() => return Ok(()),
            read = tokio::time::timeout(idle_timeout, stream.read_exact(&mut len_buf)) => read,
        };
        match read {
            Err(_) => return Ok(()),
            Ok(Err(e)) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(()),
            Ok(Err(e)) => return Err(e),
            Ok(Ok(_)) => {}
        }

        let len = u16::from_be_bytes(len_buf) as usize;
        let mut query = vec![0u8; len];
        tokio::time::timeout(idle_timeout, stream.read_exact(&mut query))
            .await
            .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "partial query"))??;

        let Some(response) = handler.handle_raw(&query).await else {
            continue;
        };
        let Ok(response_len) = u16::try_from(response.len()) else {
            error!(len = response.len(), "Response exceeds TCP message limit");
            continue;
        };

        let mut framed = Vec::with_capacity(response.len() + 2);
        framed.extend_from_slice(&response_len.to_be_bytes());
        framed.extend_from_slice(&response);
        stream.write_all(&framed).await?;
    }
}

fn create_udp_socket(domain: Domain, socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(512 * 1024)?;
    socket.set_send_buffer_size(512 * 1024)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}

fn create_tcp_listener(domain: Domain, socket_addr: SocketAddr) -> anyhow::Result<TcpListener> {
    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;
    socket.set_nonblocking(true)?;
    let std_listener: std::net::TcpListener = socket.into();
    Ok(TcpListener::from_std(std_listener)?)
}
