//! Serde mirror of the URDF subset we read.
//!
//! Attributes use quick-xml's `@` prefix. Elements we do not model
//! (materials, inertials, transmissions, gazebo tags) are skipped.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct RobotXml {
    #[serde(rename = "@name", default)]
    pub name: Option<String>,
    #[serde(rename = "link", default)]
    pub links: Vec<LinkXml>,
    #[serde(rename = "joint", default)]
    pub joints: Vec<JointXml>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LinkXml {
    #[serde(rename = "@name")]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JointXml {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@type")]
    pub kind: String,
    pub parent: LinkRefXml,
    pub child: LinkRefXml,
    #[serde(default)]
    pub origin: Option<OriginXml>,
    #[serde(default)]
    pub axis: Option<AxisXml>,
    #[serde(default)]
    pub limit: Option<LimitXml>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LinkRefXml {
    #[serde(rename = "@link")]
    pub link: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OriginXml {
    #[serde(rename = "@xyz", default)]
    pub xyz: Option<String>,
    #[serde(rename = "@rpy", default)]
    pub rpy: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AxisXml {
    #[serde(rename = "@xyz")]
    pub xyz: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LimitXml {
    #[serde(rename = "@lower", default)]
    pub lower: Option<f64>,
    #[serde(rename = "@upper", default)]
    pub upper: Option<f64>,
}
