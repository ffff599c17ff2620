//! Two-peer exchange: the network peer supplies the certificate and chain,
//! the writer peer receives the PEM results.

use std::io::{Read, Write};

use crate::adapters::channel::Channel;
use crate::domain::{EncodedChain, IssuerUri, MessageKind, RawBuffer};
use crate::infra::error::ChannelError;

pub struct ChainCoordinator<N: Read + Write, W: Read + Write> {
    net: Channel<N>,
    writer: Channel<W>,
}

impl<N: Read + Write, W: Read + Write> ChainCoordinator<N, W> {
    pub fn new(net: Channel<N>, writer: Channel<W>) -> Self {
        Self { net, writer }
    }

    /// DER certificate issued by the CA.
    pub fn receive_certificate(&mut self) -> Result<RawBuffer, ChannelError> {
        self.net.read_message(MessageKind::SignedCertificate)
    }

    /// Ask the network peer to fetch the issuer certificate.
    pub fn request_chain(&mut self, issuer: &IssuerUri) -> Result<(), ChannelError> {
        self.net
            .write_str(MessageKind::IssuerLocation, issuer.as_str())
    }

    /// Block until the network peer returns the fetched chain.
    pub fn receive_chain(&mut self) -> Result<RawBuffer, ChannelError> {
        self.net.read_message(MessageKind::CertificateChain)
    }

    pub fn forward_chain(&mut self, chain: &EncodedChain) -> Result<(), ChannelError> {
        self.writer
            .write_message(MessageKind::CertificateChain, chain.as_bytes())
    }

    pub fn forward_certificate(&mut self, cert: &EncodedChain) -> Result<(), ChannelError> {
        self.writer
            .write_message(MessageKind::SignedCertificate, cert.as_bytes())
    }

    /// Close both channels.
    pub fn close(self) {
        self.net.close();
        self.writer.close();
    }
}
