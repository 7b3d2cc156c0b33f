//! Service names for well-known TCP ports.
//!
//! A static lookup only; nothing here talks to the network.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Name reported for ports missing from the table.
pub const UNKNOWN_SERVICE: &str = "unknown";

/// Static map of well-known ports to service names.
static PORT_SERVICES: LazyLock<HashMap<u16, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    m.insert(20, "FTP-DATA");
    m.insert(21, "FTP");
    m.insert(22, "SSH");
    m.insert(23, "TELNET");
    m.insert(25, "SMTP");
    m.insert(53, "DNS");
    m.insert(69, "TFTP");
    m.insert(80, "HTTP");
    m.insert(88, "KERBEROS");
    m.insert(110, "POP3");
    m.insert(111, "RPCBIND");
    m.insert(119, "NNTP");
    m.insert(123, "NTP");
    m.insert(135, "MSRPC");
    m.insert(139, "NETBIOS-SSN");
    m.insert(143, "IMAP");
    m.insert(161, "SNMP");
    m.insert(179, "BGP");
    m.insert(389, "LDAP");
    m.insert(443, "HTTPS");
    m.insert(445, "SMB");
    m.insert(465, "SMTPS");
    m.insert(514, "SYSLOG");
    m.insert(587, "SUBMISSION");
    m.insert(631, "IPP");
    m.insert(636, "LDAPS");
    m.insert(873, "RSYNC");
    m.insert(993, "IMAPS");
    m.insert(995, "POP3S");
    m.insert(1080, "SOCKS");
    m.insert(1433, "MSSQL");
    m.insert(1521, "ORACLE");
    m.insert(1723, "PPTP");
    m.insert(1883, "MQTT");
    m.insert(2049, "NFS");
    m.insert(2375, "DOCKER");
    m.insert(3306, "MYSQL");
    m.insert(3389, "RDP");
    m.insert(5432, "POSTGRESQL");
    m.insert(5672, "AMQP");
    m.insert(5900, "VNC");
    m.insert(6379, "REDIS");
    m.insert(8080, "HTTP-PROXY");
    m.insert(8443, "HTTPS-ALT");
    m.insert(9200, "ELASTICSEARCH");
    m.insert(11211, "MEMCACHED");
    m.insert(27017, "MONGODB");

    m
});

/// Look up the service name for a port, or [`UNKNOWN_SERVICE`].
pub fn lookup(port: u16) -> &'static str {
    PORT_SERVICES.get(&port).copied().unwrap_or(UNKNOWN_SERVICE)
}
