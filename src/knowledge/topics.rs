/// One knowledge-base entry.
#[derive(Debug)]
pub struct Topic {
    pub name: &'static str,
    /// Lowercase phrases; any one contained in the question selects the topic.
    pub keywords: &'static [&'static str],
    pub answer: &'static str,
}

pub static TOPICS: &[Topic] = &[
    Topic {
        name: "digital-forensics",
        keywords: &["digital forensics", "forensic investigation", "what is forensics"],
        answer: "**Digital Forensics Overview**

Digital forensics is the process of uncovering and interpreting electronic data for investigative purposes.

**Main Types:**
1. **Computer Forensics** - hard drives, operating systems, file systems
2. **Mobile Forensics** - smartphones and tablets
3. **Network Forensics** - traffic analysis, packet capture
4. **Cloud Forensics** - data held in cloud environments
5. **Database Forensics** - records and transaction logs

**Key Principles:**
- Preserve evidence integrity
- Maintain chain of custody
- Document all procedures
- Use validated tools

**Common Tools:** EnCase and FTK for imaging, Volatility for memory, Wireshark for network traffic, Cellebrite for mobile devices.

The goal is to recover, preserve and analyze evidence while keeping it admissible in court.",
    },
    Topic {
        name: "chain-of-custody",
        keywords: &["chain of custody", "evidence handling", "preserve"],
        answer: "**Chain of Custody Best Practices**

The chain of custody keeps evidence trustworthy and admissible.

1. **Initial Collection** - document and photograph before touching anything; record location and conditions.
2. **Documentation** - unique identifier, date, time, collector's name and signature, detailed description.
3. **Handling** - minimal contact, gloves and anti-static protection, controlled storage.
4. **Transfer** - log every handoff with time, both signatures, reason and seal condition.
5. **Storage** - locked, access-controlled facility with regular inventory checks.

**Common Mistakes:** breaking seals without documentation, unauthorized access, incomplete handoff records.

A broken chain of custody can render evidence inadmissible.",
    },
    Topic {
        name: "file-systems",
        keywords: &["file system", "filesystem", "ntfs", "fat32", "ext4", "inode"],
        answer: "**File System Analysis**

**NTFS** - the Master File Table holds file metadata; journaling aids recovery; Alternate Data Streams can hide data.
**FAT32** - minimal metadata, no journal, 4GB file limit.
**ext4** - inodes hold metadata, extent-based allocation, nanosecond timestamps.

**Key Artifacts:**
- MFT entries and inodes
- Journal records of changes
- Unallocated and slack space holding deleted data
- MAC timestamps (Modified, Accessed, Created)

**Tools:** Autopsy, FTK, EnCase, log2timeline.",
    },
    Topic {
        name: "memory-forensics",
        keywords: &["memory forensics", "volatile", "volatility", "ram dump", "memory dump"],
        answer: "**Memory Forensics & Volatile Data**

RAM holds evidence that disappears at power-off: running processes, network connections, encryption keys, injected malware and clipboard contents.

**Acquisition:**
- Live capture while the system runs (DumpIt, Belkasoft RAM Capturer)
- Hibernation files
- Crash dumps

**Analysis with Volatility:**
- List processes (pslist, psscan) and find hidden ones
- Inspect loaded DLLs, handles and sockets
- Recover cached credentials and registry hives

Acquire memory first, hash the image and keep the chain of custody.",
    },
    Topic {
        name: "log-analysis",
        keywords: &["log analysis", "event log", "windows event", "syslog", "logs"],
        answer: "**Log Analysis**

**Windows Event IDs worth watching:**
- 4624 / 4625: successful / failed logon
- 4688: process creation
- 4698: scheduled task created
- 4720: user account created
- 5140: network share accessed

**Linux:** /var/log/auth.log, /var/log/syslog, /var/log/secure, web server access logs.

**Techniques:** timeline creation, cross-source correlation, anomaly detection, keyword search.

**Watch for:** log rotation and deletion, timezone mismatches, deliberate tampering.",
    },
    Topic {
        name: "metadata",
        keywords: &["metadata", "exif", "timestamp", "mac time"],
        answer: "**File Metadata Analysis**

**MAC Times:** Modified, Accessed, Changed, and Birth (creation) times.
**EXIF:** camera model, GPS coordinates, capture time - and it can be edited or stripped.
**Document metadata:** author, company, revision history, tracked changes.

**Suspicious Indicators:**
- Future-dated files
- Timestamps older than the OS install
- Files modified during the investigation
- Unusual clustering of activity

**Tools:** ExifTool, log2timeline, Autopsy.",
    },
    Topic {
        name: "encryption",
        keywords: &["encryption", "encrypted", "password", "hash", "cipher"],
        answer: "**Encryption & Hashing**

**Full disk:** BitLocker, FileVault 2, LUKS, VeraCrypt.
**File level:** password-protected archives, EFS, encrypted Office and PDF documents.
**Hashes:** MD5, SHA-1, SHA-256 verify integrity and identify known files.

**Approaches:**
1. Find keys in memory, registry, config and temp files
2. Offline dictionary or brute-force attacks (Hashcat, John the Ripper)
3. Look for unencrypted copies in backups, caches and email
4. Analyze what metadata remains visible

Document the encryption method and consider legal constraints on compelled disclosure.",
    },
    Topic {
        name: "network-forensics",
        keywords: &["network forensics", "pcap", "wireshark", "traffic", "network"],
        answer: "**Network Forensics & Traffic Analysis**

**Capture formats:** PCAP and PCAPNG.

**Artifacts:** IP and MAC addresses, DNS queries, TLS certificates, HTTP headers and cookies, email headers, transferred files.

**Techniques:**
- Follow TCP/UDP streams and extract files
- Build a communication timeline
- Spot exfiltration volume and C2 beaconing patterns

**Tools:** Wireshark, tshark, tcpdump, Zeek, Suricata, NetworkMiner.

Preserve the original captures and analyze copies.",
    },
    Topic {
        name: "malware-analysis",
        keywords: &["malware", "virus", "trojan", "ransomware", "malicious"],
        answer: "**Malware Analysis**

**Types:** viruses, worms, trojans, ransomware, spyware, rootkits, botnets.

**Static analysis:** hashes, strings, PE headers, imports, packer detection, YARA rules.
**Dynamic analysis:** run in an isolated sandbox; watch processes, file system, registry and network activity.

**Indicators of Compromise:** hashes, domains, IPs, mutexes, registry keys, scheduled tasks.

Never analyze live samples on a networked workstation.",
    },
    Topic {
        name: "cloud-forensics",
        keywords: &["cloud", "aws", "azure", "google cloud", "cloud forensics"],
        answer: "**Cloud Forensics & Remote Systems**

**Service models:**
- **IaaS** - VMs and storage; you control the OS (AWS EC2, Azure VMs, Google Compute)
- **PaaS** - managed platforms; limited forensic access
- **SaaS** - hosted applications (Office 365, Gmail); reliant on provider cooperation

**Challenges:** multi-tenancy, data spread across regions, encryption by default, short retention, jurisdiction and privacy law.

**Collection:**
1. **Native logging** - AWS CloudTrail, Azure Activity Log, Google Cloud Audit Logs
2. **API access** - snapshot volumes and buckets, export configuration
3. **Legal process** - preservation notices, subpoenas, MLAT requests

**Key artifacts:** access and API logs, VM snapshots, IAM changes, network flow logs, configuration history.

Enable logging before you need it and normalize timestamps across regions.",
    },
    Topic {
        name: "mobile-forensics",
        keywords: &["mobile", "android", "iphone", "ios device", "smartphone"],
        answer: "**Mobile Device Forensics**

**Acquisition levels:** manual, logical, file system, physical (chip-off and JTAG as last resorts).

**Key data:** call logs, SMS and chat databases, location history, photos with EXIF, app data, cloud tokens.

**Handling:** isolate from networks (Faraday bag or airplane mode), keep the device charged, record its state.

**Tools:** Cellebrite UFED, Magnet AXIOM, Oxygen Forensic, ALEAPP and iLEAPP.",
    },
    Topic {
        name: "disk-imaging",
        keywords: &["disk image", "imaging", "write blocker", "e01", "dd image"],
        answer: "**Disk Imaging**

**Formats:** raw (dd), EnCase E01/Ex01, AFF4.

**Procedure:**
1. Attach the source through a hardware write blocker
2. Hash the source (SHA-256)
3. Create the image with FTK Imager, Guymager or dc3dd
4. Hash the image and compare
5. Record tool versions and settings

Work only on verified copies; store the original securely.",
    },
    Topic {
        name: "timeline-analysis",
        keywords: &["timeline", "super timeline", "plaso", "chronolog"],
        answer: "**Timeline Analysis**

Merge timestamps from file systems, logs, registry, browser history and prefetch into one chronological view.

**Steps:**
1. Collect sources and normalize timezones to UTC
2. Build a super timeline with log2timeline/plaso
3. Filter to the incident window
4. Pivot around key events and correlate across sources

Look for gaps, clusters and timestamp manipulation.",
    },
    Topic {
        name: "deleted-file-recovery",
        keywords: &["deleted", "recover", "carving", "undelete"],
        answer: "**Deleted File Recovery**

Deleted files usually survive until overwritten: directory entries are removed but the data blocks remain.

**Methods:**
- **File system analysis** - recover MFT entries or inodes (Autopsy, FTK, EnCase)
- **File carving** - search for signatures in raw data (PhotoRec, Foremost, Scalpel)

**Common signatures:** JPEG `FF D8 FF`, PNG `89 50 4E 47`, PDF `25 50 44 46`, ZIP `50 4B 03 04`.

**Limits:** overwritten data is gone, fragmentation hurts carving, SSD TRIM erases quickly.",
    },
    Topic {
        name: "artifact-analysis",
        keywords: &["artifact", "browser history", "registry"],
        answer: "**User Artifacts**

**Browsers:** Chrome `History` SQLite, Firefox `places.sqlite`, Edge `WebCacheV01.dat`, Safari `History.db`.

**Registry:**
- RecentDocs, TypedPaths, RunMRU for user activity
- MountPoints2 and USBSTOR for attached devices
- Services and App Paths for installed software

**Execution evidence:** Prefetch, Amcache, ShimCache, LNK files and jump lists.

Correlate artifacts into a timeline before drawing conclusions.",
    },
];
