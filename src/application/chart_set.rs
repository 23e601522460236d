// Rolling charts for the representative device
use crate::domain::device::{DeviceReading, Metric};
use crate::domain::series::{SERIES_CAPACITY, SeriesBuffer, SeriesPoint};

/// Chart channels, one rolling buffer each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Cpu,
    Ram,
    Temp,
    NetSent,
    NetRecv,
}

impl Channel {
    pub const ALL: [Channel; 5] = [
        Channel::Cpu,
        Channel::Ram,
        Channel::Temp,
        Channel::NetSent,
        Channel::NetRecv,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Channel::Cpu => "cpu",
            Channel::Ram => "ram",
            Channel::Temp => "temp",
            Channel::NetSent => "net_sent",
            Channel::NetRecv => "net_recv",
        }
    }

    pub fn metric(self) -> Metric {
        match self {
            Channel::Cpu => Metric::Cpu,
            Channel::Ram => Metric::Ram,
            Channel::Temp => Metric::Temp,
            Channel::NetSent => Metric::NetworkSent,
            Channel::NetRecv => Metric::NetworkReceived,
        }
    }
}

/// The four drawable surfaces. Network draws two channels on one label axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartSurface {
    Cpu,
    Ram,
    Temp,
    Network,
}

impl ChartSurface {
    pub const ALL: [ChartSurface; 4] = [
        ChartSurface::Cpu,
        ChartSurface::Ram,
        ChartSurface::Temp,
        ChartSurface::Network,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ChartSurface::Cpu => "CPU %",
            ChartSurface::Ram => "RAM %",
            ChartSurface::Temp => "Temp °C",
            ChartSurface::Network => "Network",
        }
    }

    pub fn channels(self) -> &'static [Channel] {
        match self {
            ChartSurface::Cpu => &[Channel::Cpu],
            ChartSurface::Ram => &[Channel::Ram],
            ChartSurface::Temp => &[Channel::Temp],
            ChartSurface::Network => &[Channel::NetSent, Channel::NetRecv],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSet {
    cpu: SeriesBuffer,
    ram: SeriesBuffer,
    temp: SeriesBuffer,
    net_sent: SeriesBuffer,
    net_recv: SeriesBuffer,
}

impl Default for ChartSet {
    fn default() -> Self {
        Self::with_capacity(SERIES_CAPACITY)
    }
}

impl ChartSet {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cpu: SeriesBuffer::with_capacity(capacity),
            ram: SeriesBuffer::with_capacity(capacity),
            temp: SeriesBuffer::with_capacity(capacity),
            net_sent: SeriesBuffer::with_capacity(capacity),
            net_recv: SeriesBuffer::with_capacity(capacity),
        }
    }

    pub fn channel(&self, channel: Channel) -> &SeriesBuffer {
        match channel {
            Channel::Cpu => &self.cpu,
            Channel::Ram => &self.ram,
            Channel::Temp => &self.temp,
            Channel::NetSent => &self.net_sent,
            Channel::NetRecv => &self.net_recv,
        }
    }

    fn channel_mut(&mut self, channel: Channel) -> &mut SeriesBuffer {
        match channel {
            Channel::Cpu => &mut self.cpu,
            Channel::Ram => &mut self.ram,
            Channel::Temp => &mut self.temp,
            Channel::NetSent => &mut self.net_sent,
            Channel::NetRecv => &mut self.net_recv,
        }
    }

    /// Append the first device's reading to every channel under one label.
    ///
    /// An empty device list leaves the charts untouched and returns `false`.
    pub fn update(&mut self, devices: &[DeviceReading], label: &str) -> bool {
        let Some(device) = devices.first() else {
            return false;
        };

        for channel in Channel::ALL {
            let value = device.metric_value(channel.metric());
            self.channel_mut(channel).push(SeriesPoint::new(label, value));
        }

        tracing::debug!(
            label,
            points = self.cpu.len(),
            "Appended representative device reading to charts"
        );
        true
    }

    pub fn len(&self) -> usize {
        self.cpu.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cpu.is_empty()
    }
}
