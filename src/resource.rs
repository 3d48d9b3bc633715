use crate::{config::AnimationConfig, errors::Error};

/// Derives the fetch address of each sprite sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    base: String,
    count: usize,
}

impl ResourceDescriptor {
    pub fn new(base: impl Into<String>, count: usize) -> Self {
        Self {
            base: base.into(),
            count,
        }
    }

    pub fn from_config(config: &AnimationConfig) -> Self {
        Self::new(config.base_address.clone(), config.resource_count)
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Address of sheet `index`, the caller keeps `index` in range
    pub fn address_for(&self, index: usize) -> String {
        format!("{}{}.jpg", self.base, index)
    }

    pub fn checked_address_for(&self, index: usize) -> Result<String, Error> {
        if index >= self.count {
            return Err(Error::InvalidIndex {
                index,
                count: self.count,
            });
        }
        Ok(self.address_for(index))
    }
}

#[cfg(test)]
mod tests {
    use hashbrown::HashSet;

    use super::*;

    #[test]
    fn test_address_for() {
        let desc = ResourceDescriptor::from_config(&AnimationConfig::default());
        assert_eq!(
            desc.address_for(3),
            "http://storage.googleapis.com/alyo/assignments/images/3.jpg"
        );
    }

    #[test]
    fn test_addresses_are_distinct_and_deterministic() {
        let desc = ResourceDescriptor::new("sheets/", 7);
        let addresses: HashSet<String> = (0..7).map(|i| desc.address_for(i)).collect();
        assert_eq!(addresses.len(), 7);
        for i in 0..7 {
            let addr = desc.address_for(i);
            assert!(addr.contains(&i.to_string()));
            assert_eq!(addr, desc.address_for(i));
        }
    }

    #[test]
    fn test_checked_address_for() {
        let desc = ResourceDescriptor::new("sheets/", 7);
        assert_eq!(desc.checked_address_for(6), Ok("sheets/6.jpg".to_string()));
        assert_eq!(
            desc.checked_address_for(7),
            Err(Error::InvalidIndex { index: 7, count: 7 })
        );
    }
}
