use ini_core as ini;

use crate::constant::*;
use crate::error::ErrorCode;
use crate::prelude::*;
use crate::util::{parse_number, ParseRadix};

/// One step of a write plan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigWrite {
    pub name: &'static str,
    pub index: u16,
    pub sub_index: u8,
    pub payload: Vec<u8>,
}

impl ConfigWrite {
    pub fn new(name: &'static str, index: u16, sub_index: u8, payload: &[u8]) -> Self {
        ConfigWrite { name, index, sub_index, payload: payload.to_vec() }
    }
}

/// Where the drive keeps its master description. These objects live in the
/// manufacturer specific area and differ between device families.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectIndices {
    pub remote_node_type: u16,
    pub remote_node_server_sdo: u16,
    pub remote_node_client_sdo: u16,
    pub remote_txpdo_1: u16,
    pub remote_rxpdo_1: u16,
    pub sdo_client_parameter: u16,
}

impl Default for ObjectIndices {
    fn default() -> Self {
        ObjectIndices {
            remote_node_type: REG_REMOTE_NODE_TYPE,
            remote_node_server_sdo: REG_REMOTE_NODE_SERVER_SDO,
            remote_node_client_sdo: REG_REMOTE_NODE_CLIENT_SDO,
            remote_txpdo_1: REG_REMOTE_NODE_TXPDO_1,
            remote_rxpdo_1: REG_REMOTE_NODE_RXPDO_1,
            sdo_client_parameter: REG_SDO_CLIENT_PARAMETER_2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommissionProfile {
    /// Our own address, announced to the node during connect.
    pub master_node_id: u8,
    /// Default budget for one SDO exchange.
    pub timeout: Duration,
    /// Stop at the first failing configuration write instead of carrying on.
    pub strict_writes: bool,
    pub objects: ObjectIndices,
    pub heartbeat_time: u16,
    pub request_cob_id: u32,
    pub response_cob_id: u32,
}

impl Default for CommissionProfile {
    fn default() -> Self {
        CommissionProfile {
            master_node_id: DEFAULT_MASTER_NODE_ID,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            strict_writes: false,
            objects: ObjectIndices::default(),
            heartbeat_time: DEFAULT_HEARTBEAT_TIME,
            request_cob_id: DEFAULT_REQUEST_COB_ID,
            response_cob_id: DEFAULT_RESPONSE_COB_ID,
        }
    }
}

impl CommissionProfile {
    /// Builds a profile from INI text; everything not mentioned keeps its default.
    pub fn from_ini(content: &str) -> Result<Self, ErrorCode> {
        let mut profile = CommissionProfile::default();
        profile.load_from_content(content)?;
        Ok(profile)
    }

    pub fn load_from_content(&mut self, content: &str) -> Result<(), ErrorCode> {
        let mut current_section_name: Option<String> = None;
        let mut current_properties: HashMap<String, String> = HashMap::new();

        for item in ini::Parser::new(content) {
            match item {
                ini::Item::Section(name) => {
                    if let Some(section_name) = current_section_name.take() {
                        self.process_section(&section_name, &current_properties)?;
                        current_properties.clear();
                    }
                    current_section_name = Some(String::from(name));
                }
                ini::Item::Property(key, maybe_value) => {
                    let value = String::from(maybe_value.unwrap_or_default());
                    current_properties.insert(String::from(key), value);
                }
                _ => {}
            }
        }

        if let Some(section_name) = current_section_name {
            self.process_section(&section_name, &current_properties)?
        }

        Ok(())
    }

    fn process_section(&mut self, section_name: &str, properties: &HashMap<String, String>)
        -> Result<(), ErrorCode> {
        let field = |key: &'static str| Field { section_name, key, properties };
        match section_name.to_ascii_lowercase().as_str() {
            "commissioning" => {
                field("MasterNodeId").apply(&mut self.master_node_id)?;
                if let Some(ms) = field("TimeoutMs").get::<u64>()? {
                    self.timeout = Duration::from_millis(ms);
                }
                if let Some(strict) = field("StrictWrites").get::<u8>()? {
                    self.strict_writes = strict != 0;
                }
            }
            "objects" => {
                let objects = &mut self.objects;
                field("RemoteNodeType").apply(&mut objects.remote_node_type)?;
                field("RemoteNodeServerSdo").apply(&mut objects.remote_node_server_sdo)?;
                field("RemoteNodeClientSdo").apply(&mut objects.remote_node_client_sdo)?;
                field("RemoteTxPdo1").apply(&mut objects.remote_txpdo_1)?;
                field("RemoteRxPdo1").apply(&mut objects.remote_rxpdo_1)?;
                field("SdoClientParameter").apply(&mut objects.sdo_client_parameter)?;
            }
            "baseline" => field("HeartbeatTime").apply(&mut self.heartbeat_time)?,
            "link" => {
                field("RequestCobId").apply(&mut self.request_cob_id)?;
                field("ResponseCobId").apply(&mut self.response_cob_id)?;
            }
            _ => {}
        }
        Ok(())
    }

    /// The six writes pushed right after a node was identified.
    pub fn baseline_plan(&self) -> Vec<ConfigWrite> {
        let objects = &self.objects;
        vec![
            ConfigWrite::new("heartbeat producer time", REG_PRODUCER_HEARTBEAT_TIME, 0,
                             &self.heartbeat_time.to_le_bytes()),
            ConfigWrite::new("remote node type", objects.remote_node_type, 0, &[NODE_TYPE_MASTER]),
            ConfigWrite::new("remote node server SDO", objects.remote_node_server_sdo, 0, &[NODE_TYPE_MASTER]),
            ConfigWrite::new("remote node client SDO", objects.remote_node_client_sdo, 0, &[PDO_ENABLE]),
            ConfigWrite::new("remote TX-PDO 1 enable", objects.remote_txpdo_1, 1, &[PDO_ENABLE]),
            ConfigWrite::new("remote RX-PDO 1 enable", objects.remote_rxpdo_1, 1, &[PDO_ENABLE]),
        ]
    }

    /// The writes that link the node's SDO client to the master.
    pub fn link_plan(&self) -> Vec<ConfigWrite> {
        let objects = &self.objects;
        let master = self.master_node_id;
        vec![
            ConfigWrite::new("request COB-ID", objects.sdo_client_parameter, 1,
                             &self.request_cob_id.to_le_bytes()),
            ConfigWrite::new("response COB-ID", objects.sdo_client_parameter, 1,
                             &self.response_cob_id.to_le_bytes()),
            ConfigWrite::new("SDO server node id", objects.sdo_client_parameter, 1, &[master]),
            ConfigWrite::new("master node type", objects.remote_node_type, 1, &[NODE_TYPE_MASTER]),
            ConfigWrite::new("master client SDO", objects.remote_node_client_sdo, 1, &[master]),
        ]
    }
}

struct Field<'a> {
    section_name: &'a str,
    key: &'static str,
    properties: &'a HashMap<String, String>,
}

impl Field<'_> {
    fn get<T: ParseRadix>(&self) -> Result<Option<T>, ErrorCode> {
        match self.properties.get(self.key) {
            None => Ok(None),
            Some(raw) => parse_number(raw).map(Some).ok_or_else(|| ErrorCode::ProcesedSectionFailed {
                section_name: self.section_name.to_owned(),
                more_info: format!("invalid value '{}' for {}", raw, self.key),
            }),
        }
    }

    fn apply<T: ParseRadix>(&self, target: &mut T) -> Result<(), ErrorCode> {
        if let Some(value) = self.get()? {
            *target = value;
        }
        Ok(())
    }
}
