//! 이동평균 크로스오버 신호 생성.
//!
//! 이 크레이트가 제공하는 기능:
//! - 종가 시계열에 대한 트레일링 이동평균 계산
//! - 단기/장기 이동평균 비교로 +1/-1/0 신호 컬럼 생성
//!
//! 모든 연산은 입력만으로 결정되는 순수 함수입니다. 같은 시계열과
//! 윈도우는 항상 같은 컬럼을 만듭니다.
//!
//! # 예제
//!
//! ```rust
//! use quantcross_core::SignalConfig;
//! use quantcross_strategy::generate_signals;
//!
//! let closes = vec![10.0, 11.0, 12.0, 11.0, 10.0];
//! let config = SignalConfig { short_window: 2, long_window: 3 };
//!
//! let frame = generate_signals(&closes, &config).unwrap();
//! assert_eq!(frame.signal, vec![0, 0, 1, 1, -1]);
//! ```

pub mod crossover;
pub mod rolling;

// 주요 타입 재내보내기
pub use crossover::{generate_signals, SignalFrame, StrategyError};
pub use rolling::rolling_mean;
