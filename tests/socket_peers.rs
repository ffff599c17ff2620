//! Worker driven over real Unix socket pairs, with peers on their own threads.

mod common;

use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::thread;

use certproc::{
    CertProcWorkflow, ChainCoordinator, Channel, Identity, MessageKind, WorkerConfiguration,
};
use common::confinement::FakeConfinement;
use common::fixtures::*;
use common::peers::frame;

fn read_frame(stream: &mut UnixStream) -> Option<(MessageKind, Vec<u8>)> {
    let mut header = [0u8; 8];
    stream.read_exact(&mut header).ok()?;
    let tag = u32::from_be_bytes(header[..4].try_into().unwrap());
    let len = u32::from_be_bytes(header[4..].try_into().unwrap()) as usize;
    let mut payload = vec![0u8; len];
    stream.read_exact(&mut payload).ok()?;
    Some((MessageKind::from_tag(tag)?, payload))
}

fn run_worker(
    net: UnixStream,
    writer: UnixStream,
) -> certproc::CertprocResult<certproc::WorkerReport> {
    let coordinator = ChainCoordinator::new(
        Channel::new(net, "netproc", 1 << 20),
        Channel::new(writer, "fileproc", 1 << 20),
    );
    CertProcWorkflow::new(
        FakeConfinement::default(),
        coordinator,
        Identity::new(65534, 65534),
        &WorkerConfiguration::default(),
    )
    .run()
}

#[test]
fn network_peer_fetches_after_issuer_request() {
    let (net_worker, mut net_peer) = UnixStream::pair().unwrap();
    let (writer_worker, mut writer_peer) = UnixStream::pair().unwrap();

    let network = thread::spawn(move || {
        net_peer
            .write_all(&frame(MessageKind::SignedCertificate, LEAF_AIA))
            .unwrap();
        let request = read_frame(&mut net_peer).expect("issuer request");
        assert_eq!(request.0, MessageKind::IssuerLocation);
        let uri = String::from_utf8(request.1).unwrap();
        assert_eq!(uri, ISSUER_URI);
        net_peer
            .write_all(&frame(MessageKind::CertificateChain, ISSUER_DER))
            .unwrap();
        // Worker closes its end once done.
        assert!(read_frame(&mut net_peer).is_none());
    });

    let writer = thread::spawn(move || {
        let mut frames = Vec::new();
        while let Some(f) = read_frame(&mut writer_peer) {
            frames.push(f);
        }
        frames
    });

    let report = run_worker(net_worker, writer_worker).unwrap();
    assert_eq!(report.issuer.as_str(), ISSUER_URI);

    network.join().unwrap();
    let delivered = writer.join().unwrap();
    assert_eq!(
        delivered,
        vec![
            (MessageKind::CertificateChain, ISSUER_PEM.to_vec()),
            (MessageKind::SignedCertificate, LEAF_AIA_PEM.to_vec()),
        ]
    );
}

#[test]
fn network_peer_hangup_leaves_writer_empty() {
    let (net_worker, mut net_peer) = UnixStream::pair().unwrap();
    let (writer_worker, mut writer_peer) = UnixStream::pair().unwrap();

    let network = thread::spawn(move || {
        net_peer
            .write_all(&frame(MessageKind::SignedCertificate, LEAF_AIA))
            .unwrap();
        let _ = read_frame(&mut net_peer);
        // Dropping the stream closes it before any chain is sent.
    });

    let err = run_worker(net_worker, writer_worker).unwrap_err();
    assert_eq!(err.kind(), "ChannelIO");
    network.join().unwrap();

    let mut rest = Vec::new();
    writer_peer.read_to_end(&mut rest).unwrap();
    assert!(rest.is_empty());
}
