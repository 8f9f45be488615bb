use std::thread::{self, JoinHandle};

/// ZAP handler endpoint, consulted by `PLAIN` servers in the same context.
const ZAP_ENDPOINT: &str = "inproc://zeromq.zap.01";

/// What a [`FakeLookingGlass`] saw of its single client.
#[derive(Debug)]
pub struct Seen {
    /// The request frames.
    pub request: Vec<String>,
    /// The `PLAIN` username and password, if authentication was required.
    pub credentials: Option<(String, String)>,
}

/// A scripted looking glass: a `REP` socket serving a single request on a loopback port.
pub struct FakeLookingGlass {
    port: u16,
    handle: JoinHandle<Seen>,
}

impl FakeLookingGlass {
    /// Serve `reply` to the first request received, without authentication.
    pub fn spawn(reply: Vec<String>) -> Self {
        Self::spawn_with(false, reply)
    }

    /// Serve `reply`, requiring `PLAIN` authentication if `plain` is set. Any credentials are
    /// accepted, and reported by [`FakeLookingGlass::seen`].
    pub fn spawn_with(plain: bool, reply: Vec<String>) -> Self {
        let ctx = zmq::Context::new();
        let zap = plain.then(|| {
            let zap = ctx.socket(zmq::REP).unwrap();
            zap.bind(ZAP_ENDPOINT).unwrap();
            zap
        });
        let socket = ctx.socket(zmq::REP).unwrap();
        socket.set_linger(1000).unwrap();
        socket.set_plain_server(plain).unwrap();
        socket.bind("tcp://127.0.0.1:*").unwrap();
        let port = socket
            .get_last_endpoint()
            .unwrap()
            .unwrap()
            .rsplit(':')
            .next()
            .unwrap()
            .parse()
            .unwrap();
        let handle = thread::spawn(move || {
            let credentials = zap.as_ref().map(authenticate);
            let request = socket
                .recv_multipart(0)
                .unwrap()
                .into_iter()
                .map(|frame| String::from_utf8(frame).unwrap())
                .collect();
            socket
                .send_multipart(reply.into_iter().map(String::into_bytes), 0)
                .unwrap();
            drop((socket, zap, ctx));
            Seen {
                request,
                credentials,
            }
        });
        Self { port, handle }
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Wait for the reply to be sent, returning what the client presented.
    pub fn seen(self) -> Seen {
        self.handle.join().unwrap()
    }

    /// Wait for the reply to be sent, returning the request frames.
    pub fn request(self) -> Vec<String> {
        self.seen().request
    }
}

/// Answer one ZAP request with success, returning the presented credentials.
fn authenticate(zap: &zmq::Socket) -> (String, String) {
    let request = zap.recv_multipart(0).unwrap();
    assert_eq!(request[5], b"PLAIN");
    let reply: [&[u8]; 6] = [b"1.0", &request[1], b"200", b"OK", &request[6], b""];
    zap.send_multipart(reply, 0).unwrap();
    (
        String::from_utf8(request[6].clone()).unwrap(),
        String::from_utf8(request[7].clone()).unwrap(),
    )
}
