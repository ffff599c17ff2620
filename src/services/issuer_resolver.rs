//! Issuer resolution from the Authority Information Access extension.
//!
//! Only `id-pe-authorityInfoAccess` is ever consulted, so the extension is
//! decoded directly into `AuthorityInfoAccessSyntax` and flattened into
//! named descriptors.

use std::net::{Ipv4Addr, Ipv6Addr};

use der::Decode;
use x509_cert::ext::pkix::name::GeneralName;
use x509_cert::ext::pkix::AuthorityInfoAccessSyntax;

use crate::domain::constants::{
    CA_ISSUERS_URI, METHOD_CA_ISSUERS, METHOD_OCSP, OID_AD_CA_ISSUERS, OID_AD_OCSP,
    OID_AUTHORITY_INFO_ACCESS,
};
use crate::domain::{AccessDescriptor, Certificate, IssuerUri};
use crate::infra::error::ResolveError;

pub struct IssuerResolver;

impl IssuerResolver {
    /// Return the location of the first `"CA Issuers - URI"` descriptor.
    pub fn resolve(cert: &Certificate) -> Result<IssuerUri, ResolveError> {
        let descriptors = Self::access_descriptors(cert)?;
        log::debug!(
            "Authority Information Access carries {} descriptor(s)",
            descriptors.len()
        );

        let uri = descriptors
            .into_iter()
            .filter(|d| d.name == CA_ISSUERS_URI)
            .find_map(|d| IssuerUri::new(d.location))
            .ok_or(ResolveError::NoIssuerUri)?;

        log::info!("CA issuer: {uri}");
        Ok(uri)
    }

    /// Decode the Authority Information Access extension in encoded order.
    pub fn access_descriptors(cert: &Certificate) -> Result<Vec<AccessDescriptor>, ResolveError> {
        let mut matching = cert
            .inner()
            .tbs_certificate
            .extensions
            .iter()
            .flatten()
            .filter(|ext| ext.extn_id == OID_AUTHORITY_INFO_ACCESS);

        let ext = matching.next().ok_or(ResolveError::NoIssuerExtension)?;
        if matching.next().is_some() {
            return Err(ResolveError::MalformedExtension(
                "extension present more than once".to_string(),
            ));
        }

        let aia = AuthorityInfoAccessSyntax::from_der(ext.extn_value.as_bytes())
            .map_err(|e| ResolveError::MalformedExtension(e.to_string()))?;

        Ok(aia
            .0
            .iter()
            .map(|desc| {
                let method = if desc.access_method == OID_AD_CA_ISSUERS {
                    METHOD_CA_ISSUERS.to_string()
                } else if desc.access_method == OID_AD_OCSP {
                    METHOD_OCSP.to_string()
                } else {
                    desc.access_method.to_string()
                };
                let (kind, location) = describe_general_name(&desc.access_location);
                AccessDescriptor::new(format!("{method} - {kind}"), location)
            })
            .collect())
    }
}

fn describe_general_name(name: &GeneralName) -> (&'static str, String) {
    match name {
        GeneralName::UniformResourceIdentifier(uri) => ("URI", uri.to_string()),
        GeneralName::DnsName(dns) => ("DNS", dns.to_string()),
        GeneralName::Rfc822Name(email) => ("email", email.to_string()),
        GeneralName::DirectoryName(dn) => ("DirName", dn.to_string()),
        GeneralName::RegisteredId(oid) => ("Registered ID", oid.to_string()),
        GeneralName::IpAddress(ip) => ("IP Address", describe_ip(ip.as_bytes())),
        _ => ("othername", "<unsupported>".to_string()),
    }
}

fn describe_ip(bytes: &[u8]) -> String {
    if let Ok(v4) = <[u8; 4]>::try_from(bytes) {
        Ipv4Addr::from(v4).to_string()
    } else if let Ok(v6) = <[u8; 16]>::try_from(bytes) {
        Ipv6Addr::from(v6).to_string()
    } else {
        format!("<invalid {}>", hex::encode(bytes))
    }
}
